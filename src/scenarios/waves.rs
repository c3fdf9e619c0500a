//! Travelling waves. Both scenarios evaluate a closed-form wave equation at
//! the current time instead of integrating particle by particle.

use std::f64::consts::TAU;

use crate::bodies::{Body, BodyColor};
use crate::core::input::{Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::SimulationState;
use crate::math::{safe_div, Vector2};
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

const CANVAS_WIDTH: f64 = 1000.0;
const EQUILIBRIUM_Y: f64 = 300.0;
const PARTICLE_RADIUS: f64 = 8.0;

const WAVE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("amplitude", 0.0, 3.0, ResetPolicy::Live),
    ParamSpec::positive("frequency", 5.0, ResetPolicy::Reset),
    ParamSpec::positive("wavelength", 10.0, ResetPolicy::Reset),
];

const WAVE_PARTICLES: usize = 20;
const WAVE_PIXELS_PER_METER: f64 = 50.0;

fn particle(x: f64) -> Body {
    Body::new(Vector2::new(x, EQUILIBRIUM_Y), Vector2::zero(), 1.0, 0.0, PARTICLE_RADIUS, BodyColor::Coral)
}

/// Transverse wave `y = A·sin(k·x - ω·t + φ)` sampled by a row of particles
#[derive(Debug, Clone)]
pub struct WaveMotionScenario {
    amplitude: f64,
    frequency: f64,
    wavelength: f64,
    particles: Vec<Body>,

    /// Extra phase of each particle, spread evenly over one cycle
    phases: Vec<f64>,
}

impl WaveMotionScenario {
    pub fn new() -> Self {
        let particles = (0..WAVE_PARTICLES)
            .map(|i| particle(i as f64 / WAVE_PARTICLES as f64 * CANVAS_WIDTH))
            .collect();
        let mut scenario = Self {
            amplitude: 1.0,
            frequency: 0.5,
            wavelength: 4.0,
            particles,
            phases: Vec::new(),
        };
        scenario.reset();
        scenario
    }

    pub fn wave_number(&self) -> f64 {
        safe_div(TAU, self.wavelength)
    }

    pub fn angular_frequency(&self) -> f64 {
        TAU * self.frequency
    }

    /// `v = f·λ`
    pub fn wave_speed(&self) -> f64 {
        self.frequency * self.wavelength
    }

    pub fn particles(&self) -> &[Body] {
        &self.particles
    }

    fn evaluate(&mut self, time: f64) {
        let (k, omega) = (self.wave_number(), self.angular_frequency());
        let reach = self.amplitude * WAVE_PIXELS_PER_METER;
        for (particle, phase) in self.particles.iter_mut().zip(&self.phases) {
            let x = particle.position.x / WAVE_PIXELS_PER_METER;
            let argument = k * x - omega * time + phase;
            particle.position.y = EQUILIBRIUM_Y - reach * argument.sin();
            particle.velocity.y = reach * omega * argument.cos();
        }
    }
}

impl Default for WaveMotionScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for WaveMotionScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::WaveMotion
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        WAVE_PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "amplitude" => Some(self.amplitude),
            "frequency" => Some(self.frequency),
            "wavelength" => Some(self.wavelength),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "amplitude" => self.amplitude = value,
            "frequency" => self.frequency = value,
            "wavelength" => self.wavelength = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        self.evaluate(ctx.time);
    }

    fn reset(&mut self) {
        self.phases = (0..WAVE_PARTICLES)
            .map(|i| i as f64 / WAVE_PARTICLES as f64 * TAU)
            .collect();
        self.evaluate(0.0);
    }

    fn state(&self) -> SimulationState {
        SimulationState::new()
            .with("wave_speed", self.wave_speed())
            .with("period", safe_div(1.0, self.frequency))
            .with("angular_frequency", self.angular_frequency())
            .with("wave_number", self.wave_number())
            .with_bodies(&self.particles)
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('w') || key.is_letter('p') {
            KeyOutcome::Ignored
        } else {
            KeyOutcome::Unhandled
        }
    }
}

const SOUND_PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("frequency", 2000.0, ResetPolicy::Reset),
    ParamSpec::new("amplitude", 0.0, 3.0, ResetPolicy::Live),
];

const SPEED_OF_SOUND: f64 = 343.0;
const SOUND_PARTICLES: usize = 40;
const SOURCE_X: f64 = 100.0;

/// Peak particle displacement in pixels at unit amplitude
const DISPLACEMENT_SCALE: f64 = 20.0;

/// Pixels per unit of distance in the phase term
const DISTANCE_SCALE: f64 = 100.0;

/// Longitudinal pressure wave pushing a row of air particles back and forth
#[derive(Debug, Clone)]
pub struct SoundWavesScenario {
    frequency: f64,
    amplitude: f64,
    equilibrium: Vec<f64>,
    particles: Vec<Body>,
}

impl SoundWavesScenario {
    pub fn new() -> Self {
        let span = CANVAS_WIDTH - 2.0 * SOURCE_X;
        let equilibrium: Vec<f64> = (0..SOUND_PARTICLES)
            .map(|i| i as f64 / SOUND_PARTICLES as f64 * span + SOURCE_X)
            .collect();
        let particles = equilibrium.iter().map(|&x| particle(x)).collect();
        Self { frequency: 440.0, amplitude: 1.0, equilibrium, particles }
    }

    /// `λ = v / f`
    pub fn wavelength(&self) -> f64 {
        safe_div(SPEED_OF_SOUND, self.frequency)
    }

    pub fn particles(&self) -> &[Body] {
        &self.particles
    }

    /// Displacement of each particle from its rest position
    pub fn displacements(&self) -> Vec<f64> {
        self.particles
            .iter()
            .zip(&self.equilibrium)
            .map(|(p, rest)| p.position.x - rest)
            .collect()
    }
}

impl Default for SoundWavesScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for SoundWavesScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::SoundWaves
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        SOUND_PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "frequency" => Some(self.frequency),
            "amplitude" => Some(self.amplitude),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "frequency" => self.frequency = value,
            "amplitude" => self.amplitude = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let omega = TAU * self.frequency;
        let k = safe_div(TAU, self.wavelength());
        let reach = self.amplitude * DISPLACEMENT_SCALE;
        for (particle, &rest) in self.particles.iter_mut().zip(&self.equilibrium) {
            let distance = (rest - SOURCE_X) / DISTANCE_SCALE;
            let argument = omega * ctx.time - k * distance;
            particle.position.x = rest + reach * argument.sin();
            particle.velocity.x = reach * omega * argument.cos();
        }
    }

    fn reset(&mut self) {
        for (particle, &rest) in self.particles.iter_mut().zip(&self.equilibrium) {
            particle.position.x = rest;
            particle.velocity = Vector2::zero();
        }
    }

    fn state(&self) -> SimulationState {
        SimulationState::new()
            .with("frequency", self.frequency)
            .with("wavelength", self.wavelength())
            .with("period", safe_div(1.0, self.frequency))
            .with("speed", SPEED_OF_SOUND)
            .with_bodies(&self.particles)
            .with_particles(self.displacements())
    }
}

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Names the equal-tempered note nearest to `frequency`, e.g. `"A4"` for 440 Hz.
///
/// Returns `"N/A"` for frequencies that are not positive.
pub fn musical_note(frequency: f64) -> String {
    if !frequency.is_finite() || frequency <= 0.0 {
        return "N/A".to_string();
    }
    let half_steps = (12.0 * (frequency / 440.0).log2()).round() as i32;
    let octave = (half_steps + 9).div_euclid(12) + 4;
    let index = ((half_steps % 12) + 12 + 9) % 12;
    format!("{}{}", NOTE_NAMES[index as usize], octave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;
    use approx::assert_relative_eq;

    #[test]
    fn notes_around_a4() {
        assert_eq!(musical_note(440.0), "A4");
        assert_eq!(musical_note(261.63), "C4");
        assert_eq!(musical_note(880.0), "A5");
        assert_eq!(musical_note(220.0), "A3");
        assert_eq!(musical_note(0.0), "N/A");
        assert_eq!(musical_note(-5.0), "N/A");
    }

    #[test]
    fn wave_particles_stay_within_amplitude() {
        let mut wave = WaveMotionScenario::new();
        let mut events = EventQueue::new();
        for tick in 0..300 {
            let mut ctx = StepContext { time: tick as f64 / 60.0, dt: 1.0 / 60.0, events: &mut events };
            wave.integrate(&mut ctx);
            for p in wave.particles() {
                assert!((p.position.y - EQUILIBRIUM_Y).abs() <= 50.0 + 1e-9);
            }
        }
        assert_relative_eq!(wave.wave_speed(), 2.0);
    }

    #[test]
    fn sound_particles_oscillate_about_rest() {
        let mut sound = SoundWavesScenario::new();
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.37, dt: 1.0 / 60.0, events: &mut events };
        sound.integrate(&mut ctx);
        assert!(sound.displacements().iter().all(|d| d.abs() <= 20.0 + 1e-9));

        sound.reset();
        assert!(sound.displacements().iter().all(|&d| d == 0.0));
    }
}
