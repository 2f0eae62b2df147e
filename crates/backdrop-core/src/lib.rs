pub mod bucket;
pub mod composite;
pub mod consts;
pub mod error;
pub mod frame;
pub mod histogram;
pub mod io;
pub mod mode;
pub mod pipeline;
pub mod reconstruct;
