//! Name-to-factory table for animation variants.

use std::collections::HashMap;

use lumo_core::AnimationConfig;

use crate::animation::Animation;
use crate::animations::*;
use crate::custom::CustomField;
use crate::error::Error;

/// A variant factory: config plus initial surface size in, boxed
/// animation out. Factories may fail (the custom compiler does).
pub type Factory = Box<dyn Fn(&AnimationConfig, u32, u32) -> Result<Box<dyn Animation>, Error>>;

/// Explicit registration table mapping variant names to factories.
///
/// Built-in variants are installed at construction under fixed string
/// keys; [`register`](Registry::register) extends the table at runtime.
pub struct Registry {
    factories: HashMap<String, Factory>,
}

macro_rules! builtin {
    ($table:expr, $name:literal, $ty:ty) => {
        $table.insert(
            $name.to_string(),
            Box::new(|config: &AnimationConfig, w: u32, h: u32| {
                Ok(Box::new(<$ty>::new(config, w, h)) as Box<dyn Animation>)
            }) as Factory,
        );
    };
}

impl Registry {
    /// Build a registry holding every built-in variant.
    pub fn with_builtins() -> Self {
        let mut factories: HashMap<String, Factory> = HashMap::new();
        builtin!(factories, "aurora", Aurora);
        builtin!(factories, "breathing", Breathing);
        builtin!(factories, "bubbles", Bubbles);
        builtin!(factories, "clouds", Clouds);
        builtin!(factories, "constellation", Constellation);
        builtin!(factories, "embers", Embers);
        builtin!(factories, "fireworks", Fireworks);
        builtin!(factories, "flames", Flames);
        builtin!(factories, "floating", Floating);
        builtin!(factories, "flow", Flow);
        builtin!(factories, "helix", Helix);
        builtin!(factories, "leaves", Leaves);
        builtin!(factories, "orbit", Orbit);
        builtin!(factories, "plasma", Plasma);
        builtin!(factories, "rain", Rain);
        builtin!(factories, "ripples", Ripples);
        builtin!(factories, "snowfall", Snowfall);
        builtin!(factories, "spirals", Spirals);
        builtin!(factories, "starfield", Starfield);
        builtin!(factories, "waves", Waves);
        factories.insert(
            "custom".to_string(),
            Box::new(|config: &AnimationConfig, w: u32, h: u32| {
                if config.custom_code.is_none() {
                    return Err(Error::MissingCustomCode);
                }
                Ok(Box::new(CustomField::new(config, w, h)?) as Box<dyn Animation>)
            }),
        );
        Self { factories }
    }

    /// Register (or replace) a factory under `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: Factory) {
        self.factories.insert(name.into(), factory);
    }

    /// Names of all registered variants, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the variant `config.variant` against a surface of the
    /// given size.
    pub fn resolve(
        &self,
        config: &AnimationConfig,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn Animation>, Error> {
        let factory = self
            .factories
            .get(&config.variant)
            .ok_or_else(|| Error::UnknownVariant(config.variant.clone()))?;
        factory(config, width, height)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    #[test]
    fn test_all_builtins_resolve() {
        let registry = Registry::with_builtins();
        for name in [
            "aurora",
            "breathing",
            "bubbles",
            "clouds",
            "constellation",
            "embers",
            "fireworks",
            "flames",
            "floating",
            "flow",
            "helix",
            "leaves",
            "orbit",
            "plasma",
            "rain",
            "ripples",
            "snowfall",
            "spirals",
            "starfield",
            "waves",
        ] {
            let config = AnimationConfig::for_variant(name);
            assert!(registry.resolve(&config, 64, 48).is_ok(), "variant {name}");
        }
    }

    #[test]
    fn test_unknown_variant_is_error() {
        let registry = Registry::with_builtins();
        let config = AnimationConfig::for_variant("sparkles");
        match registry.resolve(&config, 10, 10) {
            Err(Error::UnknownVariant(name)) => assert_eq!(name, "sparkles"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_custom_without_code_is_error() {
        let registry = Registry::with_builtins();
        let config = AnimationConfig::for_variant("custom");
        assert!(matches!(
            registry.resolve(&config, 10, 10),
            Err(Error::MissingCustomCode)
        ));
    }

    #[test]
    fn test_custom_compile_failure_is_contained() {
        let registry = Registry::with_builtins();
        let mut config = AnimationConfig::for_variant("custom");
        config.custom_code = Some("this is not an expression!".into());
        assert!(matches!(
            registry.resolve(&config, 10, 10),
            Err(Error::Custom(_))
        ));
    }

    #[test]
    fn test_runtime_registration() {
        struct Blank;
        impl crate::Animation for Blank {
            fn update(&mut self) {}
            fn render(&self, _canvas: &mut Canvas) {}
            fn resize(&mut self, _width: u32, _height: u32) {}
        }

        let mut registry = Registry::with_builtins();
        registry.register(
            "blank",
            Box::new(|_config, _w, _h| Ok(Box::new(Blank) as Box<dyn crate::Animation>)),
        );
        let config = AnimationConfig::for_variant("blank");
        assert!(registry.resolve(&config, 10, 10).is_ok());
    }
}
