/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely
/// (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_score: Arc<Vec<u8>>,
        sfx_squash: Arc<Vec<u8>>,
        sfx_board: Arc<Vec<u8>>,
        sfx_hop_off: Arc<Vec<u8>>,
        sfx_round_over: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_score: Arc::new(make_wav(&gen_score())),
                sfx_squash: Arc::new(make_wav(&gen_squash())),
                sfx_board: Arc::new(make_wav(&gen_board())),
                sfx_hop_off: Arc::new(make_wav(&gen_blip(520.0, 0.05, 0.2))),
                sfx_round_over: Arc::new(make_wav(&gen_round_over())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_score(&self) { self.play(&self.sfx_score); }
        pub fn play_squash(&self) { self.play(&self.sfx_squash); }
        pub fn play_board(&self) { self.play(&self.sfx_board); }
        pub fn play_hop_off(&self) { self.play(&self.sfx_hop_off); }
        pub fn play_round_over(&self) { self.play(&self.sfx_round_over); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators: all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// Simple sine blip with a linear fade out
    fn gen_blip(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                (t * freq * TAU).sin() * env * volume
            })
            .collect()
    }

    /// A run of (frequency, seconds) notes. `third` mixes in the 3rd
    /// harmonic for a squarer, retro tone.
    fn gen_notes(notes: &[(f32, f32)], third: f32, volume: f32) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(freq, dur) in notes {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (t * freq * TAU).sin() * (1.0 - third)
                    + (t * freq * 3.0 * TAU).sin() * third;
                samples.push(wave * env * volume);
            }
        }
        samples
    }

    /// Finish row reached: ascending arpeggio C6→E6→G6
    fn gen_score() -> Vec<f32> {
        gen_notes(&[(1047.0, 0.05), (1319.0, 0.05), (1568.0, 0.08)], 0.3, 0.25)
    }

    /// Aggressive car: noise burst over a falling tone
    fn gen_squash() -> Vec<f32> {
        let duration = 0.18;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 12345;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 300.0 - t * 200.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * freq * TAU).sin();
                // LCG noise
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(0.8);
                (tone * 0.5 + noise * 0.5) * env * 0.3
            })
            .collect()
    }

    /// Friendly car picks the frog up: two-note chime G5→C6
    fn gen_board() -> Vec<f32> {
        gen_notes(&[(784.0, 0.07), (1047.0, 0.12)], 0.0, 0.25)
    }

    /// Round over: descending A4→F#4→Eb4→C4
    fn gen_round_over() -> Vec<f32> {
        gen_notes(&[(440.0, 0.12), (370.0, 0.12), (311.0, 0.12), (261.0, 0.2)], 0.1, 0.3)
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder: wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2;
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }

}

// ════════════════════════════════════════════════════════════
//  Public API: compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_score(&self) {}
    pub fn play_squash(&self) {}
    pub fn play_board(&self) {}
    pub fn play_hop_off(&self) {}
    pub fn play_round_over(&self) {}
}
