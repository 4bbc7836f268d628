/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All effects are generated as in-memory WAV buffers at init time and
/// played fire-and-forget through detached Sinks. The boss theme is the one
/// exception: it loops on a held Sink so it can be stopped when the boss
/// goes down or the level is torn down.
///
/// Build without the "sound" feature to disable audio entirely (the stub
/// SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use rodio::source::Source;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_jump: Arc<Vec<u8>>,
        sfx_pickup: Arc<Vec<u8>>,
        sfx_clear: Arc<Vec<u8>>,
        sfx_stomp: Arc<Vec<u8>>,
        sfx_hit: Arc<Vec<u8>>,
        sfx_fall: Arc<Vec<u8>>,
        sfx_victory: Arc<Vec<u8>>,
        boss_theme: Arc<Vec<u8>>,
        music: Mutex<Option<Sink>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            let sfx_jump = Arc::new(make_wav(&gen_jump()));
            let sfx_pickup = Arc::new(make_wav(&gen_pickup()));
            let sfx_clear = Arc::new(make_wav(&gen_clear()));
            let sfx_stomp = Arc::new(make_wav(&gen_stomp()));
            let sfx_hit = Arc::new(make_wav(&gen_hit()));
            let sfx_fall = Arc::new(make_wav(&gen_fall()));
            let sfx_victory = Arc::new(make_wav(&gen_victory()));
            let boss_theme = Arc::new(make_wav(&gen_boss_theme()));

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_jump,
                sfx_pickup,
                sfx_clear,
                sfx_stomp,
                sfx_hit,
                sfx_fall,
                sfx_victory,
                boss_theme,
                music: Mutex::new(None),
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

        pub fn play_jump(&self) {
            self.play(&self.sfx_jump);
        }
        pub fn play_pickup(&self) {
            self.play(&self.sfx_pickup);
        }
        pub fn play_clear(&self) {
            self.play(&self.sfx_clear);
        }
        pub fn play_stomp(&self) {
            self.play(&self.sfx_stomp);
        }
        pub fn play_hit(&self) {
            self.play(&self.sfx_hit);
        }
        pub fn play_fall(&self) {
            self.play(&self.sfx_fall);
        }
        pub fn play_victory(&self) {
            self.play(&self.sfx_victory);
        }

        /// Start the looping boss theme. Restarts from the top if one is
        /// already playing.
        pub fn start_boss_music(&self) {
            let mut slot = match self.music.lock() {
                Ok(s) => s,
                Err(_) => return,
            };
            if let Some(old) = slot.take() {
                old.stop();
            }
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(self.boss_theme.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src.repeat_infinite());
                    sink.set_volume(0.6);
                    *slot = Some(sink);
                }
            }
        }

        pub fn stop_boss_music(&self) {
            if let Ok(mut slot) = self.music.lock() {
                if let Some(sink) = slot.take() {
                    sink.stop();
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// Jump: short rising chirp
    fn gen_jump() -> Vec<f32> {
        let duration = 0.1;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 300.0 + t * 500.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(0.7);
                (ti * freq * 2.0 * std::f32::consts::PI).sin() * env * 0.22
            })
            .collect()
    }

    /// Capacitor pickup: crackling zap then a bright chime
    fn gen_pickup() -> Vec<f32> {
        let mut samples = Vec::new();

        // Zap: noisy high-frequency burst
        let zap_n = (SAMPLE_RATE as f32 * 0.04) as usize;
        let mut rng: u32 = 77777;
        for i in 0..zap_n {
            let t = i as f32 / zap_n as f32;
            rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
            let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let ti = i as f32 / SAMPLE_RATE as f32;
            let tone = (ti * 2200.0 * 2.0 * std::f32::consts::PI).sin();
            samples.push((tone * 0.5 + noise * 0.5) * (1.0 - t) * 0.3);
        }

        // Chime: E6 → B6
        for &freq in &[1319.0_f32, 1976.0] {
            let n = (SAMPLE_RATE as f32 * 0.05) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 2.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
                samples.push(wave * env * 0.25);
            }
        }
        samples
    }

    /// Level clear: ascending fanfare C5→E5→G5→C6
    fn gen_clear() -> Vec<f32> {
        let notes = [523.0_f32, 659.0, 784.0, 1047.0];
        let note_dur = 0.1;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.3;
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.6
                    + (t * freq * 2.0 * 2.0 * std::f32::consts::PI).sin() * 0.3
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.1;
                samples.push(wave * env * 0.3);
            }
        }
        // Sustain the last note
        let last_freq = 1047.0_f32;
        let n = (SAMPLE_RATE as f32 * 0.25) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32);
            samples.push((t * last_freq * 2.0 * std::f32::consts::PI).sin() * env * 0.3);
        }
        samples
    }

    /// Stomp: low thud with a quick pitch drop
    fn gen_stomp() -> Vec<f32> {
        let duration = 0.14;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 160.0 - t * 100.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(1.5);
                (ti * freq * 2.0 * std::f32::consts::PI).sin() * env * 0.4
            })
            .collect()
    }

    /// Side hit: harsh descending buzz
    fn gen_hit() -> Vec<f32> {
        let duration = 0.16;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 424242;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 420.0 - t * 260.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * freq * 2.0 * std::f32::consts::PI).sin();
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(0.8);
                (tone * 0.6 + noise * 0.4) * env * 0.3
            })
            .collect()
    }

    /// Fall out of the world: long descending whistle
    fn gen_fall() -> Vec<f32> {
        let duration = 0.35;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 700.0 - t * 550.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(0.6);
                (ti * freq * 2.0 * std::f32::consts::PI).sin() * env * 0.25
            })
            .collect()
    }

    /// Boss down: triumphant fanfare, wider than the level-clear one
    fn gen_victory() -> Vec<f32> {
        let notes = [523.0_f32, 659.0, 784.0, 1047.0, 784.0, 1047.0, 1319.0];
        let note_dur = 0.11;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.25;
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.6
                    + (t * freq * 2.0 * 2.0 * std::f32::consts::PI).sin() * 0.4;
                samples.push(wave * env * 0.3);
            }
        }
        let last_freq = 1319.0_f32;
        let n = (SAMPLE_RATE as f32 * 0.4) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32);
            samples.push((t * last_freq * 2.0 * std::f32::consts::PI).sin() * env * 0.3);
        }
        samples
    }

    /// Boss theme: a short minor-key bass loop
    fn gen_boss_theme() -> Vec<f32> {
        // A2  A2  C3  A2  E3  D3  C3  B2, straight eighths
        let notes = [110.0_f32, 110.0, 130.8, 110.0, 164.8, 146.8, 130.8, 123.5];
        let note_dur = 0.22;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let frac = i as f32 / n as f32;
                let env = if frac < 0.05 { frac / 0.05 } else { (1.0 - frac).powf(0.4) };
                // Square-ish wave for menace
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.5
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.3
                    + (t * freq * 5.0 * 2.0 * std::f32::consts::PI).sin() * 0.2;
                samples.push(wave * env * 0.22);
            }
        }
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps f32 samples into a valid WAV buffer
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
            let clamped = s.max(-1.0).min(1.0);
            let val = (clamped * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> {
        Some(SoundEngine)
    }
    pub fn play_jump(&self) {}
    pub fn play_pickup(&self) {}
    pub fn play_clear(&self) {}
    pub fn play_stomp(&self) {}
    pub fn play_hit(&self) {}
    pub fn play_fall(&self) {}
    pub fn play_victory(&self) {}
    pub fn start_boss_music(&self) {}
    pub fn stop_boss_music(&self) {}
}
