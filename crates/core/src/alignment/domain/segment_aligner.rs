use thiserror::Error;

use crate::alignment::domain::speaker_segment::SpeakerSegment;
use crate::diarization::domain::speaker_turn::{SpeakerId, SpeakerTurn};
use crate::transcription::domain::transcript_segment::TranscriptSegment;

/// Alignment depends on both inputs being sorted by start time; an
/// unsorted sequence is an upstream contract violation and always fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("transcript segments not sorted by start time (index {index})")]
    UnsortedSegments { index: usize },
    #[error("speaker turns not sorted by start time (index {index})")]
    UnsortedTurns { index: usize },
}

/// Assign a speaker to each transcript segment by overlap-duration voting.
///
/// For every segment, overlap durations with intersecting turns are
/// summed per speaker and the speaker with the largest total wins. Voting
/// on total overlap (rather than taking the first overlapping turn) is
/// robust to diarization jitter at speaker-change boundaries and to one
/// speaker's turns arriving fragmented.
///
/// Ties are broken by the turn containing the segment midpoint, then by
/// the speaker whose turn lies nearest the midpoint, then by the lower
/// speaker id. A segment no turn intersects keeps `speaker = None`.
///
/// Output preserves segment order; one input segment yields exactly one
/// output segment. The sweep advances a single cursor over the
/// time-sorted turn list, so cost is linear in segments plus turns.
pub fn align(
    segments: Vec<TranscriptSegment>,
    turns: &[SpeakerTurn],
) -> Result<Vec<SpeakerSegment>, AlignmentError> {
    check_sorted(&segments, turns)?;

    let mut aligned = Vec::with_capacity(segments.len());
    let mut cursor = 0usize;

    for segment in segments {
        // Retire turns that end before this segment starts; later
        // segments start no earlier, so they can't need them either.
        while cursor < turns.len() && turns[cursor].end_time <= segment.start_time {
            cursor += 1;
        }

        let mut overlapping: Vec<&SpeakerTurn> = Vec::new();
        let mut idx = cursor;
        while idx < turns.len() && turns[idx].start_time < segment.end_time {
            if overlap(&segment, &turns[idx]) > 0.0 {
                overlapping.push(&turns[idx]);
            }
            idx += 1;
        }

        let speaker = vote(&segment, &overlapping);
        aligned.push(SpeakerSegment::new(segment, speaker));
    }

    Ok(aligned)
}

fn check_sorted(
    segments: &[TranscriptSegment],
    turns: &[SpeakerTurn],
) -> Result<(), AlignmentError> {
    for (index, pair) in segments.windows(2).enumerate() {
        if pair[1].start_time < pair[0].start_time {
            return Err(AlignmentError::UnsortedSegments { index: index + 1 });
        }
    }
    for (index, pair) in turns.windows(2).enumerate() {
        if pair[1].start_time < pair[0].start_time {
            return Err(AlignmentError::UnsortedTurns { index: index + 1 });
        }
    }
    Ok(())
}

/// Overlap duration between `[s.start, s.end)` and `[t.start, t.end)`.
fn overlap(segment: &TranscriptSegment, turn: &SpeakerTurn) -> f64 {
    (segment.end_time.min(turn.end_time) - segment.start_time.max(turn.start_time)).max(0.0)
}

/// Pick the winning speaker among the turns overlapping one segment.
fn vote(segment: &TranscriptSegment, overlapping: &[&SpeakerTurn]) -> Option<SpeakerId> {
    if overlapping.is_empty() {
        return None;
    }

    // Total overlap per speaker, in order of first appearance so the
    // scan below stays deterministic.
    let mut totals: Vec<(SpeakerId, f64)> = Vec::new();
    for turn in overlapping {
        let amount = overlap(segment, turn);
        match totals.iter_mut().find(|(id, _)| *id == turn.speaker) {
            Some((_, total)) => *total += amount,
            None => totals.push((turn.speaker, amount)),
        }
    }

    let best_total = totals
        .iter()
        .map(|&(_, total)| total)
        .fold(f64::NEG_INFINITY, f64::max);
    let candidates: Vec<SpeakerId> = totals
        .iter()
        .filter(|&&(_, total)| total == best_total)
        .map(|&(id, _)| id)
        .collect();

    if candidates.len() == 1 {
        return Some(candidates[0]);
    }

    // Tied on total overlap: prefer the speaker whose turn contains the
    // segment midpoint (distance zero), then the nearest turn to the
    // midpoint, then the lower speaker id.
    let midpoint = segment.midpoint();
    candidates
        .into_iter()
        .map(|id| {
            let distance = overlapping
                .iter()
                .filter(|turn| turn.speaker == id)
                .map(|turn| distance_to_turn(midpoint, turn))
                .fold(f64::INFINITY, f64::min);
            (id, distance)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(id, _)| id)
}

/// Absolute distance from a point to a turn interval; zero inside it.
fn distance_to_turn(time: f64, turn: &SpeakerTurn) -> f64 {
    if turn.contains(time) {
        0.0
    } else if time < turn.start_time {
        turn.start_time - time
    } else {
        time - turn.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment::new(start, end, text)
    }

    fn turn(start: f64, end: f64, speaker: u32) -> SpeakerTurn {
        SpeakerTurn::new(start, end, SpeakerId(speaker))
    }

    #[test]
    fn test_largest_total_overlap_wins() {
        // Speaker 1 covers 4s of the first segment, speaker 2 only 1s.
        let segments = vec![seg(0.0, 5.0, "hello"), seg(5.0, 9.0, "world")];
        let turns = vec![turn(0.0, 4.0, 1), turn(4.0, 9.0, 2)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, Some(SpeakerId(1)));
        assert_eq!(aligned[0].speaker_label().unwrap(), "Speaker 1");
        assert_eq!(aligned[1].speaker, Some(SpeakerId(2)));
        assert_eq!(aligned[1].speaker_label().unwrap(), "Speaker 2");
    }

    #[test]
    fn test_fragmented_turns_sum_per_speaker() {
        // Speaker 1 appears as two 2s fragments (4s total) against one
        // 3s turn from speaker 2; the fragments must win combined.
        let segments = vec![seg(0.0, 7.0, "long segment")];
        let turns = vec![turn(0.0, 2.0, 1), turn(2.0, 5.0, 2), turn(5.0, 7.0, 1)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, Some(SpeakerId(1)));
    }

    #[test]
    fn test_tie_broken_by_midpoint_containment() {
        // Both speakers overlap exactly 2s; the midpoint (2.0) falls in
        // speaker 2's turn.
        let segments = vec![seg(0.0, 4.0, "tied")];
        let turns = vec![turn(0.0, 2.0, 1), turn(2.0, 4.0, 2)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, Some(SpeakerId(2)));
    }

    #[test]
    fn test_tie_with_midpoint_in_gap_prefers_nearest_turn() {
        // Equal 1s overlaps at each end, midpoint (3.0) in the gap
        // between them; speaker 2's turn starts 1.5s from the midpoint,
        // speaker 1's ends 2s from it.
        let segments = vec![seg(0.0, 6.0, "gapped")];
        let turns = vec![turn(0.0, 1.0, 1), turn(4.5, 5.5, 2)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, Some(SpeakerId(2)));
    }

    #[test]
    fn test_full_tie_prefers_lower_speaker_id() {
        // Overlaps and midpoint distances are symmetric.
        let segments = vec![seg(0.0, 6.0, "symmetric")];
        let turns = vec![turn(0.0, 1.0, 2), turn(5.0, 6.0, 1)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, Some(SpeakerId(1)));
    }

    #[test]
    fn test_no_overlapping_turn_leaves_segment_unlabeled() {
        let segments = vec![seg(10.0, 12.0, "orphan")];
        let turns = vec![turn(0.0, 5.0, 1)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, None);
    }

    #[test]
    fn test_empty_turns_leave_all_unlabeled() {
        let segments = vec![seg(0.0, 1.0, "a"), seg(1.0, 2.0, "b")];
        let aligned = align(segments, &[]).unwrap();
        assert!(aligned.iter().all(|s| s.speaker.is_none()));
        assert_eq!(aligned.len(), 2);
    }

    #[test]
    fn test_touching_turn_does_not_count_as_overlap() {
        // Turn ends exactly where the segment starts: zero-duration
        // intersection must not vote.
        let segments = vec![seg(5.0, 6.0, "edge")];
        let turns = vec![turn(0.0, 5.0, 1)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned[0].speaker, None);
    }

    #[test]
    fn test_order_and_count_preserved() {
        let segments = vec![
            seg(0.0, 1.0, "one"),
            seg(1.0, 2.0, "two"),
            seg(2.0, 3.0, "three"),
        ];
        let turns = vec![turn(0.0, 3.0, 1)];

        let aligned = align(segments, &turns).unwrap();
        assert_eq!(aligned.len(), 3);
        let texts: Vec<&str> = aligned.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert!(aligned.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }

    #[test]
    fn test_long_turn_spanning_many_segments() {
        // A single long turn must label every segment under it, even
        // though the sweep cursor can't retire it.
        let segments = vec![
            seg(0.0, 2.0, "a"),
            seg(2.0, 4.0, "b"),
            seg(4.0, 6.0, "c"),
        ];
        let turns = vec![turn(0.0, 10.0, 3)];

        let aligned = align(segments, &turns).unwrap();
        assert!(aligned.iter().all(|s| s.speaker == Some(SpeakerId(3))));
    }

    #[test]
    fn test_overlapping_turns_from_imperfect_model() {
        // Different-speaker turns that overlap each other must not panic
        // and must still resolve by total overlap.
        let segments = vec![seg(0.0, 4.0, "contested")];
        let turns = vec![turn(0.0, 3.0, 1), turn(1.0, 4.0, 2)];

        let aligned = align(segments, &turns).unwrap();
        // 3s each: tie. Midpoint 2.0 is inside both turns, so the lower
        // id wins.
        assert_eq!(aligned[0].speaker, Some(SpeakerId(1)));
    }

    #[test]
    fn test_unsorted_segments_rejected() {
        let segments = vec![seg(5.0, 6.0, "later"), seg(0.0, 1.0, "earlier")];
        let err = align(segments, &[]).unwrap_err();
        assert_eq!(err, AlignmentError::UnsortedSegments { index: 1 });
    }

    #[test]
    fn test_unsorted_turns_rejected() {
        let segments = vec![seg(0.0, 1.0, "a")];
        let turns = vec![turn(5.0, 6.0, 1), turn(0.0, 1.0, 2)];
        let err = align(segments, &turns).unwrap_err();
        assert_eq!(err, AlignmentError::UnsortedTurns { index: 1 });
    }

    #[test]
    fn test_empty_segments_yield_empty_output() {
        let aligned = align(Vec::new(), &[turn(0.0, 1.0, 1)]).unwrap();
        assert!(aligned.is_empty());
    }
}
