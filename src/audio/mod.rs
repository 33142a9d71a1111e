pub mod codec;
pub mod pipeline;
pub mod resample;
pub mod store;
pub mod wav;

pub use codec::{decode_frame, OPUS_SAMPLE_RATE};
pub use pipeline::{encode_batch, encode_speaker_track};
pub use resample::{quantize, resample};
pub use store::{AudioFrame, PacketStore};
pub use wav::{encode_wav, silent_wav, write_wav, TARGET_SAMPLE_RATE};
