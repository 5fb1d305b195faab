//! Sample rate conversion using rubato.
//!
//! Pure Rust FFT-based resampling, no FFI dependencies. Operates on whole
//! mono buffers; the analysis pipeline resamples once per request before any
//! frame-wise processing.

use rubato::{FftFixedInOut, Resampler};

use crate::error::AudioError;

/// Converts a mono sample buffer from `from_rate` to `to_rate`.
///
/// The output length is `ceil(len * to_rate / from_rate)` truncated to the
/// exact ratio; trailing samples introduced by zero-padding the final FFT
/// block are dropped.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AudioError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(AudioError::InvalidSampleRate(from_rate.min(to_rate)));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    // Frames per processing block. The FFT resampler fixes both the input
    // and output block sizes from this hint.
    let chunk_size = 1024;
    let mut resampler =
        FftFixedInOut::<f32>::new(from_rate as usize, to_rate as usize, chunk_size, 1)?;

    let expected_len =
        (samples.len() as u64 * to_rate as u64 / from_rate as u64) as usize;

    let mut output: Vec<f32> = Vec::with_capacity(expected_len + chunk_size);
    let mut input_block = vec![vec![0.0f32; 0]];
    let mut pos = 0;

    while pos < samples.len() {
        let needed = resampler.input_frames_next();
        let end = (pos + needed).min(samples.len());

        input_block[0].clear();
        input_block[0].extend_from_slice(&samples[pos..end]);
        // Zero-pad the final partial block.
        input_block[0].resize(needed, 0.0);

        let mut output_block = vec![vec![0.0f32; resampler.output_frames_next()]];
        let (_, written) = resampler.process_into_buffer(&input_block, &mut output_block, None)?;
        output.extend_from_slice(&output_block[0][..written]);

        pos = end;
    }

    output.truncate(expected_len);
    Ok(output)
}
