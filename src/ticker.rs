use chrono::{Local, NaiveTime};
use log::{debug, info, trace};
use rand::Rng;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::clock::ClockFace;
use crate::error::Result;
use crate::markers::MarkerSet;
use crate::render::{Frame, Layout, Renderer};
use crate::surface::Scene;
use crate::terminal::{Host, HostEvent};
use crate::theme::PALETTE;

/// The 2 × 5 grid of the ten palette themes.
pub const DEFAULT_LAYOUT: Layout = Layout { rows: 2, cols: 5 };

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

pub trait WallClock {
    fn now(&self) -> NaiveTime;
}

pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Owns the scene and every face drawn on it, and drives their updates.
pub struct Ticker {
    scene: Scene,
    faces: BTreeMap<(usize, usize), ClockFace>,
    layout: Layout,
    interval: Duration,
}

impl Ticker {
    /// One face per grid slot, themed from the palette in order, each with
    /// its own shuffle of `alphabet`. Center symbols start at `now`.
    pub fn from_palette<R: Rng + ?Sized>(
        layout: Layout,
        size: u32,
        alphabet: &MarkerSet,
        rng: &mut R,
        now: &NaiveTime,
    ) -> Result<Self> {
        let mut scene = Scene::new();
        let mut faces = BTreeMap::new();

        for index in 0..layout.len() {
            let theme = PALETTE[index % PALETTE.len()];
            let markers = alphabet.shuffled(rng);
            let face = ClockFace::new(&mut scene, size, Some(markers), Some(theme), now)?;
            faces.insert(layout.position(index), face);
        }
        info!(
            "created {} clock faces in a {}x{} grid",
            faces.len(),
            layout.rows,
            layout.cols
        );

        Ok(Self {
            scene,
            faces,
            layout,
            interval: DEFAULT_TICK,
        })
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn faces(&self) -> impl Iterator<Item = (&(usize, usize), &ClockFace)> {
        self.faces.iter()
    }

    pub fn face(&self, row: usize, col: usize) -> Option<&ClockFace> {
        self.faces.get(&(row, col))
    }

    /// Moves every face to `now`. Faces are independent, so order does not
    /// matter.
    pub fn tick(&mut self, now: &NaiveTime) -> Result<()> {
        trace!("tick at {}", now);
        for face in self.faces.values() {
            face.update(&mut self.scene, now)?;
        }
        Ok(())
    }

    pub fn frame(&self, renderer: &Renderer, width: usize, height: usize) -> Frame {
        let placements = self
            .faces
            .iter()
            .map(|(&(row, col), face)| (face.canvas(), row, col));
        renderer.rasterize(&self.scene, placements, self.layout, width, height)
    }

    /// Ticks immediately and then once per interval until the host reports
    /// a close. Resizes redraw without waiting for the next tick.
    pub fn run<H: Host, C: WallClock>(
        &mut self,
        host: &mut H,
        clock: &C,
        renderer: &Renderer,
    ) -> Result<()> {
        let mut next_tick = Instant::now();
        let mut redraw = false;

        loop {
            if Instant::now() >= next_tick {
                self.tick(&clock.now())?;
                next_tick += self.interval;
                // Skip ticks missed while suspended instead of replaying them
                let now = Instant::now();
                if next_tick < now {
                    next_tick = now + self.interval;
                }
                redraw = true;
            }

            if redraw {
                let (width, height) = host.dimensions()?;
                host.present(&self.frame(renderer, width, height))?;
                redraw = false;
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            match host.wait(timeout)? {
                HostEvent::Continue => {}
                HostEvent::Redraw => redraw = true,
                HostEvent::Close => {
                    debug!("close requested, stopping");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{EGYPTIAN, LATIN};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    struct FixedClock(NaiveTime);

    impl WallClock for FixedClock {
        fn now(&self) -> NaiveTime {
            self.0
        }
    }

    struct ScriptedHost {
        events: VecDeque<HostEvent>,
        frames: Vec<String>,
    }

    impl ScriptedHost {
        fn new(events: Vec<HostEvent>) -> Self {
            Self {
                events: events.into(),
                frames: Vec::new(),
            }
        }
    }

    impl Host for ScriptedHost {
        fn dimensions(&self) -> Result<(usize, usize)> {
            Ok((100, 20))
        }

        fn wait(&mut self, _timeout: Duration) -> Result<HostEvent> {
            Ok(self.events.pop_front().unwrap_or(HostEvent::Close))
        }

        fn present(&mut self, frame: &Frame) -> Result<()> {
            self.frames.push(frame.text());
            Ok(())
        }
    }

    fn ticker(alphabet: &MarkerSet) -> Ticker {
        let mut rng = StdRng::seed_from_u64(42);
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        Ticker::from_palette(DEFAULT_LAYOUT, 300, alphabet, &mut rng, &midnight).unwrap()
    }

    #[test]
    fn ten_faces_in_two_rows() {
        let ticker = ticker(&EGYPTIAN);
        assert_eq!(ticker.faces().count(), 10);
        for row in 0..2 {
            for col in 0..5 {
                let face = ticker.face(row, col).unwrap();
                assert_eq!(face.theme(), &PALETTE[row * 5 + col]);
            }
        }
        assert!(ticker.face(2, 0).is_none());
    }

    #[test]
    fn every_face_gets_a_bijective_shuffle() {
        let ticker = ticker(&EGYPTIAN);
        let alphabet: HashSet<char> = EGYPTIAN.0.iter().copied().collect();
        for (_, face) in ticker.faces() {
            let glyphs: HashSet<char> = face.markers().0.iter().copied().collect();
            assert_eq!(glyphs, alphabet);
            assert!(face.markers().is_permutation_of(&EGYPTIAN));
        }
    }

    #[test]
    fn faces_are_shuffled_independently() {
        let ticker = ticker(&EGYPTIAN);
        let distinct: HashSet<[char; 24]> = ticker
            .faces()
            .map(|(_, face)| face.markers().0)
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn faces_show_the_current_hour_before_the_first_tick() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let ticker = Ticker::from_palette(DEFAULT_LAYOUT, 300, &LATIN, &mut rng, &now).unwrap();
        for (_, face) in ticker.faces() {
            let label = ticker.scene().label(face.center_label()).unwrap();
            assert_eq!(label.text, face.markers().0[8].to_string());
        }
    }

    #[test]
    fn tick_updates_every_center_symbol() {
        let mut ticker = ticker(&LATIN);
        ticker.tick(&NaiveTime::from_hms_opt(13, 0, 0).unwrap()).unwrap();
        for (_, face) in ticker.faces() {
            let label = ticker.scene().label(face.center_label()).unwrap();
            assert_eq!(label.text, face.markers().0[13].to_string());
        }
    }

    #[test]
    fn run_draws_once_then_stops_on_close() {
        let mut ticker = ticker(&LATIN);
        let mut host = ScriptedHost::new(vec![HostEvent::Close]);
        let clock = FixedClock(NaiveTime::from_hms_opt(9, 30, 0).unwrap());

        ticker.run(&mut host, &clock, &Renderer::new(1)).unwrap();

        assert_eq!(host.frames.len(), 1);
        assert_eq!(host.frames[0].lines().count(), 20);
        let face = ticker.face(0, 0).unwrap();
        let label = ticker.scene().label(face.center_label()).unwrap();
        assert_eq!(label.text, face.markers().0[9].to_string());
    }

    #[test]
    fn resize_redraws_without_a_tick() {
        let mut ticker = ticker(&LATIN).with_interval(Duration::from_secs(3600));
        let mut host = ScriptedHost::new(vec![HostEvent::Redraw, HostEvent::Continue]);
        let clock = FixedClock(NaiveTime::from_hms_opt(0, 0, 0).unwrap());

        ticker.run(&mut host, &clock, &Renderer::new(1)).unwrap();

        assert_eq!(host.frames.len(), 2);
    }
}
