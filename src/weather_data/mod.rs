pub mod data_loader;
pub mod error;
pub mod frame_cache;
pub mod frame_fetcher;
pub mod open_meteo;
pub mod request;
pub mod response;
pub mod response_cache;
pub mod retry;
pub mod source;
