//! The six stages of bright channel prior dehazing.
//!
//! Data flows strictly forward:
//! bright channel and max color difference, blended by the rectifier, feed the
//! atmospheric light estimate; rectified map and light give the transmittance;
//! all of it inverts the haze model in the radiance stage.

mod bright_channel;
mod max_color_difference;
mod rectify;
mod atmospheric_light;
mod transmittance;
mod radiance;

#[cfg(test)]
mod tests;

pub use bright_channel::{bright_channel, max_color, BrightChannelMap};
pub use max_color_difference::{max_color_difference, rank_channels_by_mean, MaxColorDifferenceMap};
pub use rectify::{rectify, saturation_lambda, RectifiedMap};
pub use atmospheric_light::{dark_sample_count, estimate_atmospheric_light, AtmosphericLight, LightSample};
pub use transmittance::{clamp_light, transmittance, TransmittanceMap, MAX_LIGHT};
pub use radiance::recover_scene_radiance;
