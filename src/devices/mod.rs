//! The devices of the chip and the traits the host implements to present them.
mod framebuffer;
mod keypad;

pub use framebuffer::Framebuffer;
pub use keypad::Keypad;

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will present the current framebuffer, called after every clear and
    /// draw instruction.
    fn display(&mut self, frame: &Framebuffer);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for playing the tone while the sound timer is set
pub trait AudioCommands {
    /// The sound timer became non zero.
    fn start_tone(&mut self);
    /// The sound timer reached zero.
    fn stop_tone(&mut self);
}
