use crate::core::{ThermalEffectResult, ThermalError, ThermalResult};

/// Stretch a per-minute effect series across `target_len` sensor samples.
///
/// Sample `j` of the output is the effect linearly interpolated at fractional
/// index `j * (len - 1) / (target_len - 1)`, so the first and last samples of
/// both series line up.
pub fn stretch_effect(effect: &[f64], target_len: usize) -> ThermalResult<Vec<f64>> {
    match (effect.len(), target_len) {
        (0, _) => Err(ThermalError::insufficient("effect stretching", 1, 0)),
        (_, 0) => Ok(Vec::new()),
        (1, _) => Ok(vec![effect[0]; target_len]),
        (_, 1) => Ok(vec![effect[0]]),
        (len, _) => {
            let ratio = (len - 1) as f64 / (target_len - 1) as f64;
            Ok((0..target_len)
                .map(|j| {
                    let pos = j as f64 * ratio;
                    let lo = (pos.floor() as usize).min(len - 2);
                    let frac = pos - lo as f64;
                    effect[lo] + (effect[lo + 1] - effect[lo]) * frac
                })
                .collect())
        }
    }
}

/// [`stretch_effect`] applied to every point of a synthesized result.
pub fn stretch_result(result: &ThermalEffectResult, target_len: usize) -> ThermalResult<Vec<Vec<f64>>> {
    result
        .rows()
        .iter()
        .map(|row| stretch_effect(row, target_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_endpoints_line_up() {
        let effect = [0.0, 10.0, 20.0];
        let stretched = stretch_effect(&effect, 5).unwrap();
        assert_eq!(stretched, vec![0.0, 5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_stretch_can_shrink() {
        let effect: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let shrunk = stretch_effect(&effect, 3).unwrap();
        assert_eq!(shrunk, vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn test_stretch_edge_cases() {
        assert!(stretch_effect(&[], 4).is_err());
        assert!(stretch_effect(&[1.0, 2.0], 0).unwrap().is_empty());
        assert_eq!(stretch_effect(&[7.0], 3).unwrap(), vec![7.0; 3]);
        assert_eq!(stretch_effect(&[7.0, 8.0], 1).unwrap(), vec![7.0]);
    }

    #[test]
    fn test_stretch_result_rows() {
        let result = ThermalEffectResult::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]], 2);
        let stretched = stretch_result(&result, 3).unwrap();
        assert_eq!(stretched, vec![vec![0.0, 0.5, 1.0], vec![2.0, 1.0, 0.0]]);
    }
}
