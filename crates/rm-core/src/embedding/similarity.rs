/// コサイン類似度を [0,1] にクランプして返す。
///
/// L2 正規化済み埋め込み同士のコサインは経験的に非負だが、生の値が
/// 負になったケースは 0.0 に切り上げる。次元不一致・ゼロベクトルは
/// 0.0（前者は warn ログ付き）。
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let a = vec![0.6, 0.8, 0.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn orthogonal_and_opposite_vectors_floor_at_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        // 負のコサインはクランプされる
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    }

    #[test]
    fn zero_vectors_yield_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn dimension_mismatch_yields_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
