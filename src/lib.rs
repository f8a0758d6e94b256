//! edgematch locates every instance of a template in an image at unknown
//! scale.
//!
//! Both images are reduced to Canny edge maps, the target is resampled over a
//! linear range of scale factors, each scale is scored with zero-mean
//! normalized cross-correlation, and overlapping hits are pruned with greedy
//! non-maximum suppression. Per-scale work can run on the rayon pool with the
//! `rayon` feature; the `tracing` feature emits spans for each stage.
//!
//! ```no_run
//! use edgematch::io::load_gray_image;
//! use edgematch::{locate_instances, LocateConfig};
//!
//! let target = load_gray_image("scene.png")?;
//! let template = load_gray_image("ship.png")?;
//! for det in locate_instances(target.view(), template.view(), &LocateConfig::default())? {
//!     println!("({}, {}) - ({}, {}) {:.2}", det.x1, det.y1, det.x2, det.y2, det.score);
//! }
//! # Ok::<(), edgematch::EdgeMatchError>(())
//! ```

mod candidate;
pub mod edges;
pub mod image;
pub mod kernel;
pub mod ops;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use candidate::nms::{suppress, suppress_with};
pub use candidate::{Detection, OverlapBasis};
pub use edges::{edge_map, EdgeThresholds, Preprocess};
pub use crate::image::io;
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{Kernel, ScoreMap};
pub use ops::{DefaultOps, ImageOps};
pub use search::{locate_instances, LocateConfig, Locator, ScaleOrder, ScaleRange};
pub use template::TemplatePlan;
pub use util::{EdgeMatchError, EdgeMatchResult};
