pub mod rashi;
pub mod vargas;
pub mod chart;
pub mod houses;
pub mod dasha;

pub use rashi::{Rashi, RASHIS};
pub use vargas::{normalize_longitude, project_sign, Divisor, DIVISORS, SUPPORTED_VARGAS};
pub use chart::{Chart, ChartInputs, ChartSet, ASCENDANT_KEY};
pub use houses::{describe_chart, house_number, render_chart, ASCENDANT_MISSING, NO_DATA};
pub use dasha::CurrentDasha;
