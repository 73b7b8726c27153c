mod fixtures;
mod metadata;
mod read;
#[cfg(feature = "async")]
mod stream;
