use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use super::{MediaError, TARGET_SAMPLE_RATE};

/// Decoded PCM: mono f32 at the container's native rate.
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Decode a complete audio file into mono PCM.
///
/// Multi-channel audio is downmixed by averaging each frame. A recognized
/// file containing no packets yields an empty buffer, not an error.
pub fn decode_audio_file(path: &Path) -> Result<DecodedAudio, MediaError> {
    if !path.exists() {
        return Err(MediaError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| MediaError::Decode(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MediaError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;
    let track = format.default_track().ok_or(MediaError::NoAudioTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| MediaError::UnsupportedFormat(e.to_string()))?;

    let sample_rate = codec_params.sample_rate.unwrap_or_else(|| {
        warn!(
            "Container reports no sample rate, assuming {} Hz",
            TARGET_SAMPLE_RATE
        );
        TARGET_SAMPLE_RATE
    });

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(MediaError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| MediaError::Decode(e.to_string()))?;
        let spec = *decoded.spec();
        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        let channels = spec.channels.count();
        if channels <= 1 {
            samples.extend_from_slice(sample_buf.samples());
        } else {
            for frame in sample_buf.samples().chunks_exact(channels) {
                samples.push(frame.iter().sum::<f32>() / channels as f32);
            }
        }
    }

    debug!(
        "Decoded {:?}: {} mono samples at {} Hz ({:.1}s)",
        path,
        samples.len(),
        sample_rate,
        samples.len() as f64 / sample_rate as f64
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Minimal 16-bit PCM mono WAV file for decode tests
    fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) {
        let data_len = (samples.len() * 2) as u32;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        let mut file = File::create(path).expect("Failed to create WAV");
        file.write_all(&bytes).expect("Failed to write WAV");
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_audio_file(Path::new("/nonexistent/recording.mp3"));
        assert!(matches!(result, Err(MediaError::NotFound(_))));
    }

    #[test]
    fn test_decode_unrecognized_container() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let path = dir.path().join("garbage.mp3");
        std::fs::write(&path, b"this is not audio data at all").expect("write failed");

        let result = decode_audio_file(&path);
        assert!(matches!(result, Err(MediaError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_pcm_wav() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let path = dir.path().join("tone.wav");
        let samples: Vec<i16> = (0..1600).map(|i| ((i % 100) * 300) as i16).collect();
        write_wav(&path, 16000, &samples);

        let decoded = decode_audio_file(&path).expect("Decode failed");
        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.samples.len(), samples.len());
        assert!(decoded.samples.iter().all(|s| s.abs() <= 1.0));
    }
}
