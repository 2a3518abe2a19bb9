pub mod duration_codec;
