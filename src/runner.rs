use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

use crate::{
    chip8::ChipSet,
    definitions::{timer, Config},
    devices::{AudioCommands, DisplayCommands, Keypad},
    opcode::Operation,
    resources::Rom,
    timer::{TimedWorker, Worker},
    ConfigError, Error, ProcessError,
};

/// Ends a run from any thread.
#[derive(Debug, Clone)]
pub struct QuitHandle {
    flag: Arc<AtomicBool>,
    keypad: Keypad,
}

impl QuitHandle {
    /// The instruction loop stops before its next step, a pending key wait
    /// is cancelled.
    pub fn quit(&self) {
        log::debug!("quit requested");
        self.flag.store(true, Ordering::Release);
        self.keypad.close();
    }

    pub fn is_quit(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Takes back a quit once the run it ended is over.
    fn reset(&self) {
        self.flag.store(false, Ordering::Release);
        self.keypad.reopen();
    }
}

/// Drives a [`ChipSet`](ChipSet) with two loops. The instruction loop runs on the
/// calling thread at the configured rate, the timers are ticked at 60 hertz by the
/// worker.
pub struct Runner<D, A, W = Worker>
where
    D: DisplayCommands,
    A: AudioCommands + Send + 'static,
    W: TimedWorker,
{
    chip: ChipSet,
    display: D,
    audio: Arc<Mutex<A>>,
    worker: W,
    /// The period of a single instruction.
    interval: Duration,
    quit: QuitHandle,
}

impl<D, A> Runner<D, A, Worker>
where
    D: DisplayCommands,
    A: AudioCommands + Send + 'static,
{
    /// Will load the rom and prepare the run, nothing is executed yet.
    pub fn new(config: Config, rom: &Rom, display: D, audio: A) -> Result<Self, Error> {
        Self::with_worker(config, rom, display, audio, Worker::new())
    }
}

impl<D, A, W> Runner<D, A, W>
where
    D: DisplayCommands,
    A: AudioCommands + Send + 'static,
    W: TimedWorker,
{
    /// Same as `new`, but the timers are driven by the given worker.
    pub fn with_worker(
        config: Config,
        rom: &Rom,
        display: D,
        audio: A,
        worker: W,
    ) -> Result<Self, Error> {
        if config.instructions_per_second == 0 {
            return Err(ConfigError::ZeroInstructionRate.into());
        }
        let chip = ChipSet::new(rom, &config)?;
        let quit = QuitHandle {
            flag: Arc::new(AtomicBool::new(false)),
            keypad: chip.keypad().clone(),
        };

        Ok(Self {
            chip,
            display,
            audio: Arc::new(Mutex::new(audio)),
            worker,
            interval: config.cpu_interval(),
            quit,
        })
    }

    /// The handle the input source presses and releases the keys on.
    pub fn keypad(&self) -> Keypad {
        self.chip.keypad().clone()
    }

    /// The handle to end the run with.
    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    pub fn chip(&self) -> &ChipSet {
        &self.chip
    }

    /// Will run the program until a quit is requested or the chip fails.
    ///
    /// The timer worker is stopped and joined on every path before this
    /// returns, a playing tone is stopped. A quit requested before the call
    /// ends the run right away. Once this returns the quit is taken back, so
    /// the same runner can be run again.
    pub fn run(&mut self) -> Result<(), Error> {
        log::info!(
            "running '{}' with an instruction period of {:?}",
            self.chip.get_name(),
            self.interval
        );

        let playing = Arc::new(AtomicBool::new(false));
        let tick = {
            let timers = self.chip.timers().clone();
            let audio = self.audio.clone();
            let playing = playing.clone();
            move || {
                // the edge is taken before the tick, so a tone lasts for
                // as many ticks as the sound timer was set to
                let sounding = timers.is_sounding();
                if playing.swap(sounding, Ordering::AcqRel) != sounding {
                    let mut audio = audio.lock();
                    if sounding {
                        audio.start_tone();
                    } else {
                        audio.stop_tone();
                    }
                }
                timers.tick();
            }
        };
        self.worker.start(tick, timer::INTERVAL);

        let result = self.instruction_loop();

        self.worker.stop();
        if playing.swap(false, Ordering::AcqRel) {
            self.audio.lock().stop_tone();
        }
        self.quit.reset();

        match &result {
            Ok(()) => log::info!("stopped '{}'", self.chip.get_name()),
            Err(err) => log::error!("'{}' failed: {}\n{}", self.chip.get_name(), err, self.chip),
        }
        result.map_err(Error::from)
    }

    fn instruction_loop(&mut self) -> Result<(), ProcessError> {
        while !self.quit.is_quit() {
            let start = Instant::now();

            match self.chip.step()? {
                Operation::Draw => self.display.display(self.chip.get_display()),
                Operation::Interrupted => break,
                Operation::None => {}
            }

            // make sure there the loop will at most wait the interval
            if let Some(rest) = self.interval.checked_sub(start.elapsed()) {
                thread::sleep(rest);
            }
        }
        Ok(())
    }
}
