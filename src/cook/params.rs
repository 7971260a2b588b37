use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{EdgeFxError, EdgeFxResult},
    kernel::edge::EdgeCoefficients,
};

/// The four directional enhancement parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    /// Left enhance.
    Left,
    /// Right enhance.
    Right,
    /// Top enhance.
    Top,
    /// Bottom enhance.
    Bottom,
}

impl EdgeSide {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Source of time-varying filter parameters, evaluated once per cook.
pub trait ParamSource {
    /// Raw (unscaled) enhancement for `side` at `time`.
    fn edge(&self, side: EdgeSide, time: f32) -> f32;
}

impl ParamSource for EdgeCoefficients {
    fn edge(&self, side: EdgeSide, _time: f32) -> f32 {
        match side {
            EdgeSide::Left => self.left,
            EdgeSide::Right => self.right,
            EdgeSide::Top => self.top,
            EdgeSide::Bottom => self.bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl<'de> Deserialize<'de> for Keyframe {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f32; 2]),
            Obj { time: f32, value: f32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([time, value]) => Ok(Self { time, value }),
            Repr::Obj { time, value } => Ok(Self { time, value }),
        }
    }
}

/// A scalar parameter over time.
///
/// JSON form is either a bare number or `{ "keys": [[time, value], ...] }`. Keyframes are
/// interpolated linearly and held constant before the first and after the last key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamTrack {
    /// Same value at every time.
    Constant(f32),
    /// Piecewise linear keyframes, sorted by time.
    Keyframed {
        /// Keys with strictly increasing times.
        keys: Vec<Keyframe>,
    },
}

impl Default for ParamTrack {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl ParamTrack {
    pub fn constant(value: f32) -> Self {
        Self::Constant(value)
    }

    pub fn keyframed(keys: Vec<Keyframe>) -> EdgeFxResult<Self> {
        let track = Self::Keyframed { keys };
        track.validate()?;
        Ok(track)
    }

    pub fn validate(&self) -> EdgeFxResult<()> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(EdgeFxError::validation("parameter value must be finite"));
                }
            }
            Self::Keyframed { keys } => {
                if keys.is_empty() {
                    return Err(EdgeFxError::validation(
                        "keyframed parameter needs at least one key",
                    ));
                }
                if keys
                    .iter()
                    .any(|k| !k.time.is_finite() || !k.value.is_finite())
                {
                    return Err(EdgeFxError::validation("keyframes must be finite"));
                }
                if keys.windows(2).any(|w| w[0].time >= w[1].time) {
                    return Err(EdgeFxError::validation(
                        "keyframe times must be strictly increasing",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn sample(&self, time: f32) -> f32 {
        let keys = match self {
            Self::Constant(v) => return *v,
            Self::Keyframed { keys } => keys,
        };
        let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        // First key strictly after `time`; the guards above keep it in 1..len.
        let hi = keys.partition_point(|k| k.time <= time);
        let (a, b) = (keys[hi - 1], keys[hi]);
        let t = (time - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * t
    }
}

impl From<f32> for ParamTrack {
    fn from(v: f32) -> Self {
        Self::Constant(v)
    }
}

/// Animated left/right/top/bottom enhancement parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeParams {
    pub left: ParamTrack,
    pub right: ParamTrack,
    pub top: ParamTrack,
    pub bottom: ParamTrack,
}

impl EdgeParams {
    pub fn constant(c: EdgeCoefficients) -> Self {
        Self {
            left: c.left.into(),
            right: c.right.into(),
            top: c.top.into(),
            bottom: c.bottom.into(),
        }
    }

    pub fn track(&self, side: EdgeSide) -> &ParamTrack {
        match side {
            EdgeSide::Left => &self.left,
            EdgeSide::Right => &self.right,
            EdgeSide::Top => &self.top,
            EdgeSide::Bottom => &self.bottom,
        }
    }

    pub fn track_mut(&mut self, side: EdgeSide) -> &mut ParamTrack {
        match side {
            EdgeSide::Left => &mut self.left,
            EdgeSide::Right => &mut self.right,
            EdgeSide::Top => &mut self.top,
            EdgeSide::Bottom => &mut self.bottom,
        }
    }

    pub fn validate(&self) -> EdgeFxResult<()> {
        for side in EdgeSide::ALL {
            self.track(side).validate().map_err(|e| match e {
                EdgeFxError::Validation(msg) => {
                    EdgeFxError::validation(format!("{} enhance: {msg}", side.as_str()))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

impl ParamSource for EdgeParams {
    fn edge(&self, side: EdgeSide, time: f32) -> f32 {
        self.track(side).sample(time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cook/params.rs"]
mod tests;
