//! Peak detection
//!
//! Local-maxima search over a 1-D series with a minimum height, matching the
//! behaviour of SciPy's `find_peaks(x, height=h)`:
//!
//! - a peak has a strictly lower neighbour on both sides
//! - a flat top counts once, at its middle sample (left middle for even widths)
//! - the first and last samples are never peaks
//! - the peak value must be at least `min_height`

/// Minimum daily new cases for a peak to count as a wave
pub const PEAK_HEIGHT: f64 = 1000.0;

/// Indices of all local maxima, ascending
pub fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let i_max = x.len() - 1;
    let mut i = 1;
    while i < i_max {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < i_max && x[ahead] == x[i] {
                ahead += 1;
            }

            if x[ahead] < x[i] {
                let left = i;
                let right = ahead - 1;
                peaks.push((left + right) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

/// Indices of local maxima whose value is at least `min_height`
pub fn find_peaks(x: &[f64], min_height: f64) -> Vec<usize> {
    local_maxima(x)
        .into_iter()
        .filter(|&i| x[i] >= min_height)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_peaks() {
        let x = [0.0, 2.0, 0.0, 5.0, 1.0, 3.0, 3.5];
        assert_eq!(local_maxima(&x), vec![1, 3]);
    }

    #[test]
    fn test_plateau_counts_once_at_middle() {
        assert_eq!(local_maxima(&[0.0, 4.0, 4.0, 4.0, 1.0]), vec![2]);
        assert_eq!(local_maxima(&[0.0, 4.0, 4.0, 1.0]), vec![1]);
    }

    #[test]
    fn test_plateau_running_into_edge_is_not_a_peak() {
        assert!(local_maxima(&[0.0, 4.0, 4.0, 4.0]).is_empty());
        assert!(local_maxima(&[4.0, 4.0, 1.0]).is_empty());
    }

    #[test]
    fn test_edges_never_peak() {
        assert!(local_maxima(&[9.0, 1.0, 9.0]).is_empty());
        assert!(local_maxima(&[5.0]).is_empty());
        assert!(local_maxima(&[]).is_empty());
    }

    #[test]
    fn test_height_threshold() {
        let x = [0.0, 999.0, 0.0, 1000.0, 0.0, 4000.0, 10.0];
        assert_eq!(find_peaks(&x, PEAK_HEIGHT), vec![3, 5]);
    }

    #[test]
    fn test_peaks_never_below_threshold() {
        let x: Vec<f64> = (0..500)
            .map(|i| ((i as f64) * 0.37).sin() * 1500.0 + (i % 7) as f64 * 90.0)
            .collect();

        for idx in find_peaks(&x, PEAK_HEIGHT) {
            assert!(x[idx] >= PEAK_HEIGHT);
        }
    }
}
