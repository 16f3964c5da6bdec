//! Soundtrack decoding, analysis and mixing.

pub(crate) mod envelope;
pub(crate) mod pcm;
pub(crate) mod spectrum;
pub(crate) mod track;
