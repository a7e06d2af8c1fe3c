use crate::utils::constants::{CONTAINER_ID_PREFIX, CONTAINER_ID_SUFFIX_LEN};
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mount-point identifiers for chart widgets.
pub struct ContainerIdentity;

impl ContainerIdentity {
    pub fn create(symbol: &str) -> String {
        Self::create_with(symbol, &mut rand::thread_rng())
    }

    /// `tradingview_<symbol with non-alphanumerics as _>_<random base36>`.
    pub fn create_with<R: Rng + ?Sized>(symbol: &str, rng: &mut R) -> String {
        let normalized: String = symbol
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let suffix: String = (0..CONTAINER_ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();

        format!("{}_{}_{}", CONTAINER_ID_PREFIX, normalized, suffix)
    }
}
