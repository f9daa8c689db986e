//! The `FleetPolicy` trait.

use ft_core::SimRng;
use ft_env::Action;

use crate::{PolicyContext, PolicyParams};

/// Maps one tick's state to one action per vehicle.
///
/// Implementations must not keep per-episode state: the same policy value
/// may drive several episodes at once (e.g. a parallel batch), so it must be
/// `Send + Sync` and every source of variation must come from `ctx`, `params`
/// or `rng`.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysCharge;
///
/// impl FleetPolicy for AlwaysCharge {
///     fn decide(&self, ctx: &PolicyContext<'_>, _: &PolicyParams, _: &mut SimRng) -> Vec<Action> {
///         ctx.state.vehicles.iter().map(|v| Action::charge(v.id, 11.0)).collect()
///     }
/// }
/// ```
pub trait FleetPolicy: Send + Sync {
    /// Return actions in vehicle order.
    fn decide(&self, ctx: &PolicyContext<'_>, params: &PolicyParams, rng: &mut SimRng) -> Vec<Action>;

    /// Short label for logs.
    fn name(&self) -> &'static str {
        "policy"
    }
}
