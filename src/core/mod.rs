pub mod band_scale;
pub mod ranking;
pub mod row;
pub mod scale;
pub mod scales;
pub mod types;

pub use band_scale::{BandScale, DEFAULT_BAND_PADDING};
pub use ranking::{DEFAULT_TOP_N, RankedSet, rank};
pub use row::Row;
pub use scale::LinearScale;
pub use scales::{ChartScales, build_scales};
pub use types::{ChartLayout, Margins, Viewport};
