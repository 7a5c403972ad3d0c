use std::io;
use std::time::Duration;

use crate::drivers::InputPump;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// A centralized frame loop that drives the main UI thread.
///
/// One iteration = one pump + one handler call. The pump absorbs pending
/// device events (blocking up to `poll_interval` when idle, which is the
/// frame pacing); the handler then routes input and presents a frame.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputPump> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs the loop, taking control of the current thread until the
    /// handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D) -> io::Result<ControlFlow>,
    {
        loop {
            self.driver.pump(self.poll_interval)?;
            if let ControlFlow::Quit = handler(&mut self.driver)? {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingPump {
        pumps: usize,
    }

    impl InputPump for CountingPump {
        fn pump(&mut self, _budget: Duration) -> io::Result<()> {
            self.pumps += 1;
            Ok(())
        }
    }

    #[test]
    fn loop_pumps_before_each_handler_call() {
        let mut frames = 0;
        let mut event_loop = EventLoop::new(CountingPump { pumps: 0 }, Duration::from_millis(0));
        event_loop
            .run(|driver| {
                frames += 1;
                assert_eq!(driver.pumps, frames);
                if frames == 3 {
                    Ok(ControlFlow::Quit)
                } else {
                    Ok(ControlFlow::Continue)
                }
            })
            .unwrap();
        assert_eq!(frames, 3);
    }
}
