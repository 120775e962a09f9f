pub const MAX_STARS: u8 = 5;

const FILLED: char = '★';
const HALF: char = '⯪';
const EMPTY: char = '☆';

/// Five-star breakdown of a 0..=5 rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub filled: u8,
    pub half: bool,
    pub empty: u8,
}

impl Stars {
    /// Absent ratings count as 0, everything is clamped to [0, 5]
    pub fn from_rating(rating: Option<f64>) -> Self {
        let value = rating
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0)
            .clamp(0.0, f64::from(MAX_STARS));

        let whole = value.floor();
        let filled = whole as u8;
        let half = filled < MAX_STARS && value - whole >= 0.5;
        let empty = MAX_STARS - filled - u8::from(half);

        Stars {
            filled,
            half,
            empty,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(usize::from(MAX_STARS) * 3);
        out.extend(std::iter::repeat(FILLED).take(usize::from(self.filled)));
        if self.half {
            out.push(HALF);
        }
        out.extend(std::iter::repeat(EMPTY).take(usize::from(self.empty)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_star() {
        assert_eq!(
            Stars::from_rating(Some(3.5)),
            Stars {
                filled: 3,
                half: true,
                empty: 1
            }
        );
        assert_eq!(Stars::from_rating(Some(3.5)).render(), "★★★⯪☆");
    }

    #[test]
    fn test_below_half_rounds_down() {
        let stars = Stars::from_rating(Some(4.49));
        assert_eq!((stars.filled, stars.half, stars.empty), (4, false, 1));
    }

    #[test]
    fn test_clamped_ranges() {
        let low = Stars::from_rating(Some(-1.0));
        assert_eq!((low.filled, low.half, low.empty), (0, false, 5));

        let high = Stars::from_rating(Some(6.0));
        assert_eq!((high.filled, high.half, high.empty), (5, false, 0));
        assert_eq!(high.render(), "★★★★★");
    }

    #[test]
    fn test_absent_and_nan_are_zero() {
        assert_eq!(Stars::from_rating(None).render(), "☆☆☆☆☆");
        assert_eq!(Stars::from_rating(Some(f64::NAN)).filled, 0);
    }
}
