pub mod console;

use std::io;
use std::time::Duration;

use crate::input::PointerSample;

/// Absorb pending device events into driver state. Implementations block
/// up to `budget` waiting for the first event, which doubles as frame
/// pacing when the desktop is idle.
pub trait InputPump {
    fn pump(&mut self, budget: Duration) -> io::Result<()>;
}

impl<T: InputPump + ?Sized> InputPump for &mut T {
    fn pump(&mut self, budget: Duration) -> io::Result<()> {
        (**self).pump(budget)
    }
}

/// Pointer device: absolute position plus current/previous button masks so
/// edge signals can be derived. Polling is non-blocking; "no movement" is
/// simply an unchanged position.
pub trait PointerDevice {
    /// Absolute position in screen pixels.
    fn position(&self) -> (i32, i32);

    /// Current button mask (`input::MOUSE_*` bits).
    fn buttons(&self) -> u8;

    /// Button mask from the previous frame.
    fn prev_buttons(&self) -> u8;

    fn button_down(&self, button: u8) -> bool {
        self.buttons() & button != 0
    }

    /// Down this frame and not the last.
    fn button_clicked(&self, button: u8) -> bool {
        self.buttons() & button != 0 && self.prev_buttons() & button == 0
    }

    /// Up this frame and down the last.
    fn button_released(&self, button: u8) -> bool {
        self.buttons() & button == 0 && self.prev_buttons() & button != 0
    }

    /// Snapshot the device into the router's per-iteration sample.
    fn sample(&self) -> PointerSample {
        let (x, y) = self.position();
        PointerSample::new(x, y, self.buttons(), self.prev_buttons())
    }
}

/// Keyboard device: single buffered key, non-blocking. `get_char` returns
/// 0 when no key is pending; values at 128 and above are non-printable
/// (`input::KEY_*`).
pub trait KeyboardDevice {
    fn has_key(&self) -> bool;
    fn get_char(&mut self) -> u8;

    /// Current modifier mask (`input::MOD_*` bits).
    fn modifiers(&self) -> u8;
}

impl<T: PointerDevice + ?Sized> PointerDevice for &mut T {
    fn position(&self) -> (i32, i32) {
        (**self).position()
    }

    fn buttons(&self) -> u8 {
        (**self).buttons()
    }

    fn prev_buttons(&self) -> u8 {
        (**self).prev_buttons()
    }
}

impl<T: KeyboardDevice + ?Sized> KeyboardDevice for &mut T {
    fn has_key(&self) -> bool {
        (**self).has_key()
    }

    fn get_char(&mut self) -> u8 {
        (**self).get_char()
    }

    fn modifiers(&self) -> u8 {
        (**self).modifiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MOUSE_LEFT;

    struct Dummy {
        buttons: u8,
        prev: u8,
    }

    impl PointerDevice for Dummy {
        fn position(&self) -> (i32, i32) {
            (7, 9)
        }

        fn buttons(&self) -> u8 {
            self.buttons
        }

        fn prev_buttons(&self) -> u8 {
            self.prev
        }
    }

    #[test]
    fn edges_derive_from_the_two_masks() {
        let d = Dummy {
            buttons: MOUSE_LEFT,
            prev: 0,
        };
        assert!(d.button_clicked(MOUSE_LEFT));
        assert!(d.button_down(MOUSE_LEFT));
        assert!(!d.button_released(MOUSE_LEFT));
        let s = d.sample();
        assert_eq!((s.x, s.y), (7, 9));
        assert!(s.clicked(MOUSE_LEFT));
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Dummy {
            buttons: 0,
            prev: MOUSE_LEFT,
        };
        let r = &mut d;
        assert!(r.button_released(MOUSE_LEFT));
    }
}
