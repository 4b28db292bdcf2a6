use crate::effects::transitions::TransitionSettings;
use crate::foundation::error::{RenderError, RenderResult};
use crate::slide::component::{ComponentId, SlideComponent};

/// A named, z-ordered collection of components displayed as one unit.
///
/// Component order is the position in [`Slide::components`]: index 0 is drawn first (bottom).
/// Editing operations keep that order contiguous.
#[derive(Clone, Debug, Default)]
pub struct Slide {
    /// Display name.
    pub name: String,
    components: Vec<SlideComponent>,
    next_id: u64,
    /// Transition used when this slide is shown.
    pub transition: TransitionSettings,
    /// Auto-advance delay; `None` waits for the operator.
    pub display_time_ms: Option<u64>,
}

impl Slide {
    /// Empty slide.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Components bottom to top.
    pub fn components(&self) -> &[SlideComponent] {
        &self.components
    }

    /// Component with `id`.
    pub fn get(&self, id: ComponentId) -> Option<&SlideComponent> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// Mutable component with `id`. Any edit changes the component's cache key.
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut SlideComponent> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// Z-order of `id` (0 = bottom).
    pub fn order_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    /// Append `component` on top and return its new id.
    pub fn add(&mut self, mut component: SlideComponent) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        component.set_id(id);
        self.components.push(component);
        id
    }

    /// Remove and return the component with `id`.
    pub fn remove(&mut self, id: ComponentId) -> RenderResult<SlideComponent> {
        let i = self.index(id)?;
        Ok(self.components.remove(i))
    }

    /// Swap with the component above. No-op at the top.
    pub fn move_up(&mut self, id: ComponentId) -> RenderResult<()> {
        let i = self.index(id)?;
        if i + 1 < self.components.len() {
            self.components.swap(i, i + 1);
        }
        Ok(())
    }

    /// Swap with the component below. No-op at the bottom.
    pub fn move_down(&mut self, id: ComponentId) -> RenderResult<()> {
        let i = self.index(id)?;
        if i > 0 {
            self.components.swap(i, i - 1);
        }
        Ok(())
    }

    /// Move to the top of the z-order.
    pub fn move_to_front(&mut self, id: ComponentId) -> RenderResult<()> {
        let i = self.index(id)?;
        let c = self.components.remove(i);
        self.components.push(c);
        Ok(())
    }

    /// Move to the bottom of the z-order.
    pub fn move_to_back(&mut self, id: ComponentId) -> RenderResult<()> {
        let i = self.index(id)?;
        let c = self.components.remove(i);
        self.components.insert(0, c);
        Ok(())
    }

    fn index(&self, id: ComponentId) -> RenderResult<usize> {
        self.order_of(id).ok_or_else(|| {
            RenderError::validation(format!("slide '{}' has no component {id}", self.name))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slide/model.rs"]
mod tests;
