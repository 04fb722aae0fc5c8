mod ramp;
mod utils;

pub use ramp::fill_hue_ramp;
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    BLACK, blend_hsv, hsv, hsv2rgb, random_hue_pair, random_rgb_pair, scale_video,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;
