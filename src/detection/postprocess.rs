use crate::annotations::candidate::Candidate;

/// Non maximum suppression is a way of removing duplicate detections.
///
/// Candidates are sorted by descending confidence, then any lower-confidence
/// candidate of the same class overlapping a kept one past the IoU threshold is
/// dropped. The returned list stays confidence-sorted, so its first element is
/// the backend's best detection.
pub fn non_maximum_suppression(
    mut candidates: Vec<Candidate>,
    iou_threshold: f32,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    let mut candidates_to_remove: Vec<bool> = vec![false; candidates.len()];
    for (current_index, current) in candidates.iter().enumerate() {
        for (other_index, other) in candidates[current_index + 1..].iter().enumerate() {
            if candidates_to_remove[current_index + other_index + 1] {
                continue;
            }
            if current.class_id != other.class_id {
                continue;
            }
            if current.intersection_over_union(other) > iou_threshold {
                candidates_to_remove[current_index + other_index + 1] = true;
            }
        }
    }
    let mut drop_iter = candidates_to_remove.iter();
    candidates.retain(|_| !drop_iter.next().unwrap());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(x1: f32, y1: f32, x2: f32, y2: f32, class_id: usize, score: f32) -> Candidate {
        Candidate {
            x1,
            y1,
            x2,
            y2,
            class_id,
            score,
        }
    }

    #[test]
    fn nms_no_overlap() {
        let candidates = vec![
            candidate(0.0, 0.0, 1.0, 1.0, 0, 0.6),
            candidate(2.0, 2.0, 3.0, 3.0, 0, 0.6),
        ];
        let nms_result = non_maximum_suppression(candidates.clone(), 0.5);
        assert_eq!(nms_result, candidates);
    }

    #[test]
    fn nms_standard_usage() {
        let candidates = vec![
            candidate(0.0, 0.0, 4.0, 4.0, 0, 0.6),
            candidate(0.0, 0.0, 5.0, 5.0, 0, 0.55),
            candidate(6.0, 6.0, 10.0, 10.0, 0, 0.75),
        ];
        let nms_result = non_maximum_suppression(candidates, 0.5);
        let expected = vec![
            candidate(6.0, 6.0, 10.0, 10.0, 0, 0.75),
            candidate(0.0, 0.0, 4.0, 4.0, 0, 0.6),
        ];
        assert_eq!(nms_result, expected);
    }

    #[test]
    fn nms_overlap_but_different_classes() {
        let candidates = vec![
            candidate(0.0, 0.0, 4.5, 4.5, 0, 0.6),
            candidate(0.0, 0.0, 5.0, 5.0, 1, 0.55),
            candidate(0.5, 0.5, 4.0, 4.0, 0, 0.8),
            candidate(6.0, 6.0, 10.0, 10.0, 0, 0.75),
        ];
        let nms_result = non_maximum_suppression(candidates, 0.5);
        let expected = vec![
            candidate(0.5, 0.5, 4.0, 4.0, 0, 0.8),
            candidate(6.0, 6.0, 10.0, 10.0, 0, 0.75),
            candidate(0.0, 0.0, 5.0, 5.0, 1, 0.55),
        ];
        assert_eq!(nms_result, expected);
    }

    #[test]
    fn nms_output_is_confidence_sorted() {
        let candidates = vec![
            candidate(0.0, 0.0, 1.0, 1.0, 1, 0.3),
            candidate(4.0, 4.0, 5.0, 5.0, 0, 0.9),
            candidate(8.0, 8.0, 9.0, 9.0, 0, 0.6),
        ];
        let nms_result = non_maximum_suppression(candidates, 0.5);
        assert_eq!(nms_result[0].score, 0.9);
        assert_eq!(nms_result[1].score, 0.6);
        assert_eq!(nms_result[2].score, 0.3);
    }
}
