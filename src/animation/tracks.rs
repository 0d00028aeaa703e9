use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// How far a cursor scans linearly before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last keyframe segment a track was sampled in.
///
/// Playback usually moves forward by a fraction of a segment per frame, so
/// the next lookup almost always hits the same or the following segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    /// For `CubicSpline` this holds `[in_tangent, value, out_tangent]` per key.
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Time of the last keyframe, or zero for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sampling. Returns `None` for a track without keyframes or
    /// with fewer values than its keyframes need.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        let index = self.times.partition_point(|&t| t <= time).saturating_sub(1);
        self.sample_at_frame(index, time)
    }

    /// Samples using `cursor` as a starting guess and updates it.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        match self.times.len() {
            0 => None,
            1 => self.value_at(0),
            _ => {
                let index = self.locate(time, cursor);
                self.sample_at_frame(index, time)
            }
        }
    }

    /// Whether `values` holds exactly what `times` and the interpolation mode need.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let expected = match self.interpolation {
            InterpolationMode::CubicSpline => self.times.len() * 3,
            _ => self.times.len(),
        };
        self.values.len() == expected
    }

    /// Finds `i` with `times[i] <= time < times[i + 1]`, clamped to the ends.
    fn locate(&self, time: f32, cursor: &mut KeyframeCursor) -> usize {
        let times = &self.times;
        let last = times.len() - 1;
        let start = cursor.last_index.min(last);
        let in_segment = |i: usize| times[i] <= time && (i == last || time < times[i + 1]);

        let local_hit = if time >= times[start] {
            (start..=(start + MAX_SCAN_OFFSET).min(last)).find(|&i| in_segment(i))
        } else {
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&i| in_segment(i))
        };

        let index = local_hit
            .unwrap_or_else(|| times.partition_point(|&t| t <= time).saturating_sub(1));
        cursor.last_index = index;
        index
    }

    fn value_at(&self, index: usize) -> Option<T> {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values.get(index * 3 + 1).copied(),
            _ => self.values.get(index).copied(),
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> Option<T> {
        let last = self.times.len().checked_sub(1)?;
        if index >= last {
            return self.value_at(last);
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => self.value_at(index),
            InterpolationMode::Linear => Some(T::interpolate_linear(self.value_at(index)?, self.value_at(next)?, t)),
            InterpolationMode::CubicSpline => {
                let prev = index * 3;
                let following = next * 3;
                Some(T::interpolate_cubic(
                    *self.values.get(prev + 1)?,
                    *self.values.get(prev + 2)?,
                    *self.values.get(following)?,
                    *self.values.get(following + 1)?,
                    t,
                    dt,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_forward_playback() {
        let track = KeyframeTrack::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![0.0_f32, 1.0, 2.0, 3.0, 4.0],
            InterpolationMode::Linear,
        );
        let mut cursor = KeyframeCursor::default();

        for step in 0..40 {
            let time = step as f32 * 0.1;
            let value = track.sample_with_cursor(time, &mut cursor).unwrap();
            assert!((value - time).abs() < 1e-4, "t={time} got {value}");
        }
        assert_eq!(cursor.last_index, 3);
    }

    #[test]
    fn cursor_recovers_after_wrap() {
        let track = KeyframeTrack::new(
            (0..20).map(|i| i as f32).collect(),
            (0..20).map(|i| i as f32 * 2.0).collect::<Vec<f32>>(),
            InterpolationMode::Linear,
        );
        let mut cursor = KeyframeCursor { last_index: 18 };

        let value = track.sample_with_cursor(0.5, &mut cursor).unwrap();
        assert!((value - 1.0).abs() < 1e-5);
        assert_eq!(cursor.last_index, 0);
    }

    #[test]
    fn empty_track_samples_nothing() {
        let track: KeyframeTrack<f32> = KeyframeTrack::new(Vec::new(), Vec::new(), InterpolationMode::Linear);
        assert!(track.sample(0.0).is_none());
        assert!(track.sample_with_cursor(0.0, &mut KeyframeCursor::default()).is_none());
        assert!(track.end_time().abs() < f32::EPSILON);
    }

    #[test]
    fn short_value_list_samples_nothing_past_its_end() {
        let track = KeyframeTrack::new(vec![0.0, 1.0, 2.0], vec![0.0_f32, 1.0], InterpolationMode::Linear);
        assert!(!track.is_consistent());

        let mut cursor = KeyframeCursor::default();
        assert!(track.sample_with_cursor(0.5, &mut cursor).is_some());
        assert!(track.sample_with_cursor(1.5, &mut cursor).is_none());
        assert!(track.sample(2.0).is_none());
    }

    #[test]
    fn short_cubic_track_samples_nothing() {
        let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32; 4], InterpolationMode::CubicSpline);
        assert!(!track.is_consistent());
        assert!(track.sample(0.5).is_none());
    }
}
