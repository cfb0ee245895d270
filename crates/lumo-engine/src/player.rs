//! Scheduler and lifecycle authority for one surface.

use std::cell::Cell;
use std::rc::Rc;

use lumo_core::AnimationConfig;

use crate::animation::Animation;
use crate::canvas::Canvas;
use crate::error::Error;
use crate::registry::Registry;

/// Opaque token returned on mount. Its only operation is
/// [`dispose`](Handle::dispose), which is idempotent, safe to call before
/// the first frame, and prevents any further surface mutation.
#[derive(Debug, Clone)]
pub struct Handle {
    alive: Rc<Cell<bool>>,
}

impl Handle {
    fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Tear the animation down. Extra calls are harmless.
    pub fn dispose(&self) {
        self.alive.set(false);
    }

    /// Whether the animation is still live.
    pub fn is_live(&self) -> bool {
        self.alive.get()
    }
}

struct Mounted {
    animation: Box<dyn Animation>,
    alive: Rc<Cell<bool>>,
}

/// Drives the per-frame loop for one surface.
///
/// The player owns the canvas and at most one mounted animation, and
/// enforces single ownership: mounting tears down any prior instance
/// before installing the next. Stopping always fully reverses starting.
pub struct Player {
    canvas: Canvas,
    mounted: Option<Mounted>,
}

impl Player {
    /// Create a player for a surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            mounted: None,
        }
    }

    /// The surface being drawn to.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Whether an animation is currently installed and live.
    pub fn is_mounted(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.alive.get())
    }

    /// Resolve `config.variant` through the registry and install it,
    /// tearing down any prior instance first. On error nothing is
    /// mounted and the surface is left blank.
    pub fn mount(&mut self, registry: &Registry, config: &AnimationConfig) -> Result<Handle, Error> {
        self.unmount();
        let animation = registry.resolve(config, self.canvas.width(), self.canvas.height())?;
        let handle = Handle::new();
        self.mounted = Some(Mounted {
            animation,
            alive: Rc::clone(&handle.alive),
        });
        Ok(handle)
    }

    /// Remove the current animation, if any. Idempotent; the matching
    /// handle goes dead.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.alive.set(false);
        }
        self.canvas.clear();
    }

    /// Advance one frame: clear, update, render — strictly in that
    /// order. A tick after disposal is a no-op; the surface is not
    /// touched again.
    pub fn tick(&mut self) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        if !mounted.alive.get() {
            // Disposed from outside the loop; drop state without another
            // surface mutation.
            self.mounted = None;
            return;
        }
        self.canvas.clear();
        mounted.animation.update();
        mounted.animation.render(&mut self.canvas);
    }

    /// Propagate a container size change to the surface and the mounted
    /// animation.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.canvas.width() && height == self.canvas.height() {
            return;
        }
        self.canvas.resize(width, height);
        if let Some(mounted) = self.mounted.as_mut()
            && mounted.alive.get()
        {
            mounted.animation.resize(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted_player(variant: &str, width: u32, height: u32) -> (Player, Handle) {
        let registry = Registry::with_builtins();
        let config = AnimationConfig::for_variant(variant);
        let mut player = Player::new(width, height);
        let handle = player.mount(&registry, &config).unwrap();
        (player, handle)
    }

    #[test]
    fn test_tick_draws() {
        let (mut player, _handle) = mounted_player("breathing", 64, 48);
        player.tick();
        assert!(!player.canvas().is_blank());
    }

    #[test]
    fn test_dispose_is_idempotent_and_stops_drawing() {
        let (mut player, handle) = mounted_player("breathing", 64, 48);
        player.tick();
        handle.dispose();
        handle.dispose();
        let before = player.canvas().data().to_vec();
        player.tick();
        player.tick();
        assert_eq!(player.canvas().data(), &before[..]);
        assert!(!player.is_mounted());
    }

    #[test]
    fn test_dispose_before_first_frame() {
        let (mut player, handle) = mounted_player("bubbles", 0, 0);
        handle.dispose();
        player.tick();
        assert!(player.canvas().is_blank());
    }

    #[test]
    fn test_mount_tears_down_prior_instance() {
        let registry = Registry::with_builtins();
        let mut player = Player::new(32, 32);
        let first = player
            .mount(&registry, &AnimationConfig::for_variant("waves"))
            .unwrap();
        let second = player
            .mount(&registry, &AnimationConfig::for_variant("orbit"))
            .unwrap();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn test_failed_mount_leaves_surface_blank() {
        let registry = Registry::with_builtins();
        let mut player = Player::new(32, 32);
        player
            .mount(&registry, &AnimationConfig::for_variant("orbit"))
            .unwrap();
        player.tick();
        let mut config = AnimationConfig::for_variant("custom");
        config.custom_code = Some("not ) valid".into());
        assert!(player.mount(&registry, &config).is_err());
        assert!(!player.is_mounted());
        assert!(player.canvas().is_blank());
        player.tick();
        assert!(player.canvas().is_blank());
    }

    #[test]
    fn test_zero_size_then_resize_populates() {
        let (mut player, _handle) = mounted_player("snowfall", 0, 0);
        player.tick();
        assert!(player.canvas().is_blank());
        player.resize(80, 60);
        player.tick();
        assert!(!player.canvas().is_blank());
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let (mut player, handle) = mounted_player("flow", 40, 30);
        player.tick();
        player.unmount();
        player.unmount();
        assert!(!handle.is_live());
        assert!(player.canvas().is_blank());
    }
}
