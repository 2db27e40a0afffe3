mod arc;
mod component;
mod hierarchy;
mod partition;
mod scale;
mod state;
mod transition;
mod types;
mod zoom;

pub use component::SunburstChart;
pub use types::TreeData;
