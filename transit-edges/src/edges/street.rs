//! Walkable street segments.

use std::sync::Arc;

use crate::config::WalkOptions;
use crate::state::State;

use super::{EdgeEffect, EdgeError, EdgeType, WalkResult};

/// A named street of known length, in metres.
///
/// Walking takes `length / walking_speed` seconds (truncated) and costs that
/// time scaled by the walking reluctance. Walking it backward undoes the time
/// and cost exactly; the distance walked grows either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Street {
    name: Arc<str>,
    length: f64,
}

impl Street {
    pub fn new(name: impl Into<Arc<str>>, length: f64) -> Result<Self, EdgeError> {
        if !(length.is_finite() && length >= 0.0) {
            return Err(EdgeError::InvalidLength(length));
        }
        Ok(Self {
            name: name.into(),
            length,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the length in metres.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Seconds and weight needed to walk the street.
    fn cost(&self, options: &WalkOptions) -> Result<(i64, i64), EdgeError> {
        options
            .validate()
            .map_err(|err| EdgeError::InvalidWalkOptions(err.to_string()))?;
        let seconds = (self.length / options.walking_speed).trunc();
        let weight = (seconds * options.walking_reluctance).trunc();
        if !(seconds < i64::MAX as f64 && weight < i64::MAX as f64) {
            return Err(self.overflow());
        }
        Ok((seconds as i64, weight as i64))
    }

    fn overflow(&self) -> EdgeError {
        EdgeError::InvalidWalkOptions(format!("walking {} overflows the clock", self.name))
    }
}

impl EdgeEffect for Street {
    fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let (seconds, cost) = self.cost(options)?;
        let (Some(time), Some(weight)) = (
            state.time().checked_add(seconds),
            state.weight().checked_add(cost),
        ) else {
            return Err(self.overflow());
        };
        let mut next = state.clone();
        next.set_time(time);
        next.set_weight(weight);
        next.set_dist_walked(next.dist_walked() + self.length);
        next.stamp(EdgeType::Street, Some(self.name.clone()));
        Ok(Some(next))
    }

    fn walk_back(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let (seconds, cost) = self.cost(options)?;
        let (Some(time), Some(weight)) = (
            state.time().checked_sub(seconds),
            state.weight().checked_sub(cost),
        ) else {
            return Err(self.overflow());
        };
        let mut next = state.clone();
        next.set_time(time);
        next.set_weight(weight);
        next.set_dist_walked(next.dist_walked() + self.length);
        next.stamp(EdgeType::Street, Some(self.name.clone()));
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_lengths() {
        assert!(Street::new("A", -1.0).is_err());
        assert!(Street::new("A", f64::NAN).is_err());
        assert!(Street::new("A", f64::INFINITY).is_err());
        assert!(Street::new("A", 0.0).is_ok());
    }

    #[test]
    fn walk_uses_walking_speed() {
        let street = Street::new("Mill Lane", 170.0).unwrap();
        let state = State::new(0, 1_000);

        let next = street
            .walk(&state, &WalkOptions::default())
            .unwrap()
            .unwrap();

        // 170 m at 0.85 m/s
        assert_eq!(next.time(), 1_200);
        assert_eq!(next.weight(), 200);
        assert_eq!(next.dist_walked(), 170.0);
        assert_eq!(next.prev_edge_type(), Some(EdgeType::Street));
        assert_eq!(next.prev_edge_name(), Some("Mill Lane"));
    }

    #[test]
    fn reluctance_scales_weight_only() {
        let street = Street::new("Hill", 100.0).unwrap();
        let options = WalkOptions::new(0, 1.0, 2.5).unwrap();

        let next = street
            .walk(&State::new(0, 0), &options)
            .unwrap()
            .unwrap();
        assert_eq!(next.time(), 100);
        assert_eq!(next.weight(), 250);
    }

    #[test]
    fn rejects_unusable_walking_speed() {
        let street = Street::new("Mill Lane", 100.0).unwrap();
        let state = State::new(0, 1_000);

        for speed in [-1.0, 0.0] {
            let mut options = WalkOptions::default();
            options.walking_speed = speed;
            assert!(matches!(
                street.walk(&state, &options),
                Err(EdgeError::InvalidWalkOptions(_))
            ));
            assert!(matches!(
                street.walk_back(&state, &options),
                Err(EdgeError::InvalidWalkOptions(_))
            ));
        }
    }

    #[test]
    fn cost_too_large_for_the_clock() {
        let street = Street::new("Endless Rd", 1.0e300).unwrap();
        let options = WalkOptions::new(0, 1.0e-10, 1.0).unwrap();
        assert!(matches!(
            street.walk(&State::new(0, 1_000), &options),
            Err(EdgeError::InvalidWalkOptions(_))
        ));

        let street = Street::new("Mill Lane", 100.0).unwrap();
        let late = State::new(0, i64::MAX - 10);
        assert!(matches!(
            street.walk(&late, &WalkOptions::default()),
            Err(EdgeError::InvalidWalkOptions(_))
        ));
    }

    #[test]
    fn walk_back_moves_clock_backward() {
        let street = Street::new("Mill Lane", 170.0).unwrap();
        let state = State::new(0, 1_000);

        let next = street
            .walk_back(&state, &WalkOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(next.time(), 800);
        assert_eq!(next.weight(), -200);
        assert_eq!(next.dist_walked(), 170.0);
    }
}
