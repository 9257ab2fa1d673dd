//! PCM analysis and resynthesis: the buffer model, silence segmentation,
//! pause resynthesis, and buffer merging.

pub mod buffer;
pub mod merger;
pub mod resynth;
pub mod segmenter;
