use anyhow::{Context, Result};
use rubato::{FftFixedIn, Resampler};
use tracing::debug;

/// Target sample rate for Whisper input
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Chunk size fed to the FFT resampler
const INPUT_FRAMES: usize = 1024;

/// Resample a complete mono buffer to 16kHz.
///
/// The final partial chunk is zero-padded, so the output can carry a few
/// milliseconds of trailing silence beyond the exact rate ratio.
pub fn resample_to_16k(samples: &[f32], source_rate: u32) -> Result<Vec<f32>> {
    if source_rate == TARGET_SAMPLE_RATE {
        return Ok(samples.to_vec());
    }

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    debug!(
        "Resampling {} samples: {} Hz -> {} Hz (ratio: {:.4})",
        samples.len(),
        source_rate,
        TARGET_SAMPLE_RATE,
        ratio
    );

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        INPUT_FRAMES,
        2, // sub_chunks for quality
        1, // mono
    )
    .context("Failed to create resampler")?;

    let mut input_buffer = vec![vec![0.0f32; INPUT_FRAMES]];
    let mut output_buffer = resampler.output_buffer_allocate(true);
    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + INPUT_FRAMES);

    let mut pos = 0;
    while pos < samples.len() {
        let n = (samples.len() - pos).min(INPUT_FRAMES);
        input_buffer[0][..n].copy_from_slice(&samples[pos..pos + n]);
        if n < INPUT_FRAMES {
            input_buffer[0][n..].fill(0.0);
        }

        let (_, output_frames) = resampler
            .process_into_buffer(&input_buffer, &mut output_buffer, None)
            .context("Resampling failed")?;
        output.extend_from_slice(&output_buffer[0][..output_frames]);

        pos += n;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_at_16k() {
        let input = vec![0.25f32; 4096];
        let output = resample_to_16k(&input, 16000).expect("Resampling failed");
        assert_eq!(output, input);
    }

    #[test]
    fn test_resample_48k_to_16k_ratio() {
        let input = vec![0.0f32; 48000];
        let output = resample_to_16k(&input, 48000).expect("Resampling failed");

        let expected_ratio = 16000.0 / 48000.0;
        let actual_ratio = output.len() as f64 / input.len() as f64;
        assert!(
            (actual_ratio - expected_ratio).abs() < 0.1,
            "Expected ratio ~{:.3}, got {:.3}",
            expected_ratio,
            actual_ratio
        );
    }

    #[test]
    fn test_resample_44100_to_16k_ratio() {
        let input = vec![0.0f32; 44100];
        let output = resample_to_16k(&input, 44100).expect("Resampling failed");

        let expected_ratio = 16000.0 / 44100.0;
        let actual_ratio = output.len() as f64 / input.len() as f64;
        assert!(
            (actual_ratio - expected_ratio).abs() < 0.1,
            "Expected ratio ~{:.3}, got {:.3} (output len: {})",
            expected_ratio,
            actual_ratio,
            output.len()
        );
    }

    #[test]
    fn test_resample_empty_input() {
        let output = resample_to_16k(&[], 48000).expect("Resampling failed");
        assert!(output.is_empty());
    }
}
