use alloc::string::String;
use alloc::vec::Vec;

pub const CONFETTI_COUNT: usize = 150;

pub const CONFETTI_COLORS: [&str; 5] = ["#ec4899", "#fbbf24", "#10b981", "#3b82f6", "#8b5cf6"];

/// Extra start delay added per piece so the pieces do not all drop at once.
pub const CONFETTI_STAGGER_MS: u32 = 20;

const MAX_RANDOM_DELAY_S: f64 = 2.0;
const MIN_DURATION_S: f64 = 2.0;
const MAX_EXTRA_DURATION_S: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal position in percent of the container width.
    pub left_pct: f64,
    pub color: &'static str,
    pub delay_s: f64,
    pub duration_s: f64,
}

impl ConfettiPiece {
    pub fn style(&self) -> String {
        alloc::format!(
            "left: {:.2}%; background-color: {}; animation-delay: {:.3}s; animation-duration: {:.3}s;",
            self.left_pct,
            self.color,
            self.delay_s,
            self.duration_s
        )
    }
}

/// Lays out `count` pieces, `random` must yield values in `[0, 1)` like `Math.random`.
pub fn scatter(count: usize, mut random: impl FnMut() -> f64) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|i| {
            let left_pct = unit(random()) * 100.0;
            let color_idx = ((unit(random()) * CONFETTI_COLORS.len() as f64) as usize)
                .min(CONFETTI_COLORS.len() - 1);
            let stagger_s = (i as f64) * f64::from(CONFETTI_STAGGER_MS) / 1000.0;
            let delay_s = stagger_s + unit(random()) * MAX_RANDOM_DELAY_S;
            let duration_s = MIN_DURATION_S + unit(random()) * MAX_EXTRA_DURATION_S;
            ConfettiPiece {
                left_pct,
                color: CONFETTI_COLORS[color_idx],
                delay_s,
                duration_s,
            }
        })
        .collect()
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(values: &'static [f64]) -> impl FnMut() -> f64 {
        let mut i = 0;
        move || {
            let value = values[i % values.len()];
            i += 1;
            value
        }
    }

    #[test]
    fn full_burst_stays_in_range() {
        let pieces = scatter(CONFETTI_COUNT, sequence(&[0.0, 0.25, 0.5, 0.999_999]));

        assert_eq!(pieces.len(), CONFETTI_COUNT);
        for (i, piece) in pieces.iter().enumerate() {
            let stagger_s = i as f64 * 0.02;
            assert!((0.0..100.0).contains(&piece.left_pct));
            assert!(CONFETTI_COLORS.contains(&piece.color));
            assert!(piece.delay_s >= stagger_s && piece.delay_s < stagger_s + 2.0);
            assert!((2.0..4.0).contains(&piece.duration_s));
        }
    }

    #[test]
    fn random_source_picks_position_color_and_timing() {
        let pieces = scatter(1, sequence(&[0.5, 0.9, 0.25, 0.75]));

        assert_eq!(
            pieces[0],
            ConfettiPiece {
                left_pct: 50.0,
                color: "#8b5cf6",
                delay_s: 0.5,
                duration_s: 3.5,
            }
        );
        assert_eq!(
            pieces[0].style(),
            "left: 50.00%; background-color: #8b5cf6; animation-delay: 0.500s; animation-duration: 3.500s;"
        );
    }

    #[test]
    fn out_of_contract_randomness_is_clamped() {
        let pieces = scatter(3, sequence(&[1.0, f64::NAN, -4.0, 7.0]));
        assert!(pieces.iter().all(|p| p.left_pct <= 100.0 && p.left_pct >= 0.0));
        assert!(pieces.iter().all(|p| CONFETTI_COLORS.contains(&p.color)));
    }
}
