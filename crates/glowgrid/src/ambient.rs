//! Turn per-band samples into one light color.
//!
//! - `mix`: mean of the present samples in the selected bands (optionally only
//!   the first sub-region of each band).
//! - `boost`: every channel equal to the strongest channel is raised to 255,
//!   which saturates the dominant hue for the light.
//! - `AmbientMixer`: stateful tick; holds the previous color when no selected
//!   band produced a sample this frame.

use tracing::trace;

use crate::grid::Bands;
use crate::sampler::Rgb;

/// Which bands feed the light color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandSelection {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for BandSelection {
    fn default() -> Self {
        Self {
            top: false,
            bottom: false,
            left: true,
            right: true,
        }
    }
}

/// Mixing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixCfg {
    pub bands: BandSelection,
    /// Use only sub-region 0 of each selected band.
    pub first_only: bool,
    pub boost: bool,
}

impl Default for MixCfg {
    fn default() -> Self {
        Self {
            bands: BandSelection::default(),
            first_only: true,
            boost: true,
        }
    }
}

/// Raise every channel equal to the maximum channel to 255.
pub fn boost(c: Rgb) -> Rgb {
    let max = c.max_channel();
    let lift = |v: f64| if v == max { 255.0 } else { v };
    Rgb::new(lift(c.r), lift(c.g), lift(c.b))
}

/// Mean of the present samples in the selected bands; `None` if there are none.
pub fn mix(samples: &Bands<Option<Rgb>>, cfg: &MixCfg) -> Option<Rgb> {
    let sel = cfg.bands;
    let groups = [
        (sel.top, &samples.top),
        (sel.bottom, &samples.bottom),
        (sel.left, &samples.left),
        (sel.right, &samples.right),
    ];
    let mut acc = Rgb::new(0.0, 0.0, 0.0);
    let mut n = 0usize;
    for (_, band) in groups.iter().filter(|(on, _)| *on) {
        let take = if cfg.first_only { 1 } else { band.len() };
        for c in band.iter().take(take).flatten() {
            acc.r += c.r;
            acc.g += c.g;
            acc.b += c.b;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    let n = n as f64;
    Some(Rgb::new(acc.r / n, acc.g / n, acc.b / n))
}

/// Sampling-tick state: the last color sent to the light.
#[derive(Clone, Debug, Default)]
pub struct AmbientMixer {
    cfg: MixCfg,
    last: Option<Rgb>,
    held: bool,
}

impl AmbientMixer {
    pub fn new(cfg: MixCfg) -> Self {
        Self {
            cfg,
            last: None,
            held: false,
        }
    }

    #[inline]
    pub fn cfg(&self) -> MixCfg {
        self.cfg
    }

    #[inline]
    pub fn last(&self) -> Option<Rgb> {
        self.last
    }

    /// True when the latest `update` found no sample and fell back to `last`.
    #[inline]
    pub fn held(&self) -> bool {
        self.held
    }

    /// Color for this tick. Falls back to the previous color when nothing was
    /// sampled; `None` only before the first successful sample.
    pub fn update(&mut self, samples: &Bands<Option<Rgb>>) -> Option<Rgb> {
        match mix(samples, &self.cfg) {
            Some(c) => {
                let c = if self.cfg.boost { boost(c) } else { c };
                self.last = Some(c);
                self.held = false;
                Some(c)
            }
            None => {
                trace!(has_previous = self.last.is_some(), "no_sample_hold");
                self.held = true;
                self.last
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lr(left: Option<Rgb>, right: Option<Rgb>) -> Bands<Option<Rgb>> {
        Bands {
            left: vec![left],
            right: vec![right],
            ..Bands::default()
        }
    }

    #[test]
    fn boost_saturates_dominant_channels() {
        assert_eq!(
            boost(Rgb::new(10.0, 80.0, 40.0)),
            Rgb::new(10.0, 255.0, 40.0)
        );
        assert_eq!(
            boost(Rgb::new(90.0, 20.0, 90.0)),
            Rgb::new(255.0, 20.0, 255.0)
        );
        assert_eq!(boost(Rgb::new(0.0, 0.0, 0.0)), Rgb::new(255.0, 255.0, 255.0));
    }

    #[test]
    fn mix_averages_left_and_right() {
        let s = lr(Some(Rgb::new(100.0, 0.0, 50.0)), Some(Rgb::new(0.0, 100.0, 150.0)));
        let c = mix(&s, &MixCfg::default()).unwrap();
        assert_eq!(c, Rgb::new(50.0, 50.0, 100.0));
    }

    #[test]
    fn mix_skips_missing_and_unselected() {
        let mut s = lr(None, Some(Rgb::new(30.0, 60.0, 90.0)));
        s.top = vec![Some(Rgb::new(255.0, 255.0, 255.0))];
        assert_eq!(mix(&s, &MixCfg::default()), Some(Rgb::new(30.0, 60.0, 90.0)));
        assert_eq!(mix(&lr(None, None), &MixCfg::default()), None);
        assert_eq!(mix(&Bands::default(), &MixCfg::default()), None);
    }

    #[test]
    fn first_only_ignores_later_sub_regions() {
        let s = Bands {
            left: vec![Some(Rgb::new(10.0, 10.0, 10.0)), Some(Rgb::new(90.0, 90.0, 90.0))],
            ..Bands::default()
        };
        let first = MixCfg::default();
        assert_eq!(mix(&s, &first), Some(Rgb::new(10.0, 10.0, 10.0)));
        let all = MixCfg {
            first_only: false,
            ..first
        };
        assert_eq!(mix(&s, &all), Some(Rgb::new(50.0, 50.0, 50.0)));
    }

    #[test]
    fn mixer_holds_previous_color() {
        let mut m = AmbientMixer::new(MixCfg::default());
        assert_eq!(m.update(&lr(None, None)), None);
        let c = m
            .update(&lr(Some(Rgb::new(20.0, 40.0, 10.0)), None))
            .unwrap();
        assert_eq!(c, Rgb::new(20.0, 255.0, 10.0));
        assert!(!m.held());
        assert_eq!(m.update(&lr(None, None)), Some(c));
        assert!(m.held());
        assert_eq!(m.last(), Some(c));
        // The same color sampled again is a fresh tick, not a hold.
        m.update(&lr(Some(Rgb::new(20.0, 40.0, 10.0)), None));
        assert!(!m.held());
    }
}
