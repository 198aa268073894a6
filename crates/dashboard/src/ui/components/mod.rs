pub mod card;
pub mod chart;
pub mod tabs;
