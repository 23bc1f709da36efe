use crate::symbology::LayerStyle;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Overlay drawn on top of the globe surface.
pub trait Layer {
    fn id(&self) -> LayerId;
    fn style(&self) -> LayerStyle;
}
