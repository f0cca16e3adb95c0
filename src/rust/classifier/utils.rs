use ndarray::ArrayView1;

/// Logistic squashing, maps the real line onto `(0, 1)`.
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Target activation of `class` for a sample whose true class is `truth`.
pub(crate) fn target(class: usize, truth: usize) -> f32 {
    if class == truth {
        1.0
    } else {
        0.0
    }
}

/// Index of the strictly greatest score. Ties go to the lowest index; NaN never wins.
pub(crate) fn argmax(scores: ArrayView1<f32>) -> Option<usize> {
    let mut best_score = f32::NEG_INFINITY;
    let mut best_index = None;
    for (index, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }
    best_index
}
