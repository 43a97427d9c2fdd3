/// The checkbox-like control showing whether a listing is reserved.
pub trait ToggleControl: Send {
    /// Checks or unchecks the control.
    fn set_checked(&mut self, checked: bool);
    /// Disables or enables the control. A disabled control does not deliver clicks.
    fn set_disabled(&mut self, disabled: bool);
}

impl<T> ToggleControl for Box<T>
where
    T: ToggleControl + ?Sized,
{
    fn set_checked(&mut self, checked: bool) {
        (**self).set_checked(checked);
    }
    
    fn set_disabled(&mut self, disabled: bool) {
        (**self).set_disabled(disabled);
    }
}

/// A headless control that only records its state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub checked: bool,
    pub disabled: bool,
}

impl ToggleControl for ControlState {
    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
    
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
