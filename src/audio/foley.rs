//! Synthesized interaction sounds. Nothing here touches asset files: the
//! knob click, tuning static, match strike and ambient scares are all
//! generated sample buffers, so they work even with an empty assets dir.

use rand::Rng;
use rodio::buffer::SamplesBuffer;

use super::ambient::AmbientSound;
use super::messages::Foley;

const SAMPLE_RATE: u32 = 44_100;

fn samples_for(ms: u64) -> usize {
    (SAMPLE_RATE as u64 * ms / 1000) as usize
}

/// Short dry click for the channel knob: a couple of milliseconds of noise
/// with a steep exponential decay.
fn click() -> SamplesBuffer {
    let mut rng = rand::thread_rng();
    let n = samples_for(18);
    let data: Vec<f32> = (0..n)
        .map(|i| {
            let env = (-(i as f32) / (n as f32 / 6.0)).exp();
            rng.gen_range(-1.0f32..1.0) * env * 0.5
        })
        .collect();
    SamplesBuffer::new(1, SAMPLE_RATE, data)
}

/// White noise burst while the set tunes between channels.
fn static_burst(ms: u64) -> SamplesBuffer {
    let mut rng = rand::thread_rng();
    let n = samples_for(ms.clamp(20, 5_000));
    let fade = (n / 20).max(1);
    let data: Vec<f32> = (0..n)
        .map(|i| {
            // Short linear ramps at both ends so the burst does not pop.
            let head = (i as f32 / fade as f32).min(1.0);
            let tail = ((n - 1 - i) as f32 / fade as f32).min(1.0);
            rng.gen_range(-1.0f32..1.0) * 0.35 * head.min(tail)
        })
        .collect();
    SamplesBuffer::new(1, SAMPLE_RATE, data)
}

/// Match strike: a sharp noise transient followed by a quiet hiss tail.
fn match_strike() -> SamplesBuffer {
    let mut rng = rand::thread_rng();
    let strike = samples_for(60);
    let hiss = samples_for(700);
    let mut data = Vec::with_capacity(strike + hiss);
    for i in 0..strike {
        let env = (-(i as f32) / (strike as f32 / 4.0)).exp();
        data.push(rng.gen_range(-1.0f32..1.0) * env * 0.8);
    }
    for i in 0..hiss {
        let env = (-(i as f32) / (hiss as f32 / 2.5)).exp();
        data.push(rng.gen_range(-1.0f32..1.0) * env * 0.12);
    }
    SamplesBuffer::new(1, SAMPLE_RATE, data)
}

/// Faint electrical crackle: sparse noise spikes over near-silence.
fn crackle() -> SamplesBuffer {
    let mut rng = rand::thread_rng();
    let n = samples_for(900);
    let data: Vec<f32> = (0..n)
        .map(|_| {
            if rng.gen_bool(0.004) {
                rng.gen_range(-1.0f32..1.0) * 0.6
            } else {
                rng.gen_range(-1.0f32..1.0) * 0.01
            }
        })
        .collect();
    SamplesBuffer::new(1, SAMPLE_RATE, data)
}

/// Low thud from somewhere behind the wall: a decaying low sine.
fn thud() -> SamplesBuffer {
    let n = samples_for(450);
    let data: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = (-(i as f32) / (n as f32 / 5.0)).exp();
            (t * 55.0 * std::f32::consts::TAU).sin() * env * 0.7
        })
        .collect();
    SamplesBuffer::new(1, SAMPLE_RATE, data)
}

pub fn render(foley: Foley) -> SamplesBuffer {
    match foley {
        Foley::Click => click(),
        Foley::Static { ms } => static_burst(ms),
        Foley::MatchStrike => match_strike(),
    }
}

pub fn render_ambient(sound: AmbientSound) -> SamplesBuffer {
    match sound {
        AmbientSound::Crackle => crackle(),
        AmbientSound::Thud => thud(),
    }
}
