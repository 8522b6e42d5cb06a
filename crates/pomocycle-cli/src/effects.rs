//! Desktop notifications and the completion chime.
//!
//! Both run on a dedicated worker thread so a slow notification daemon or
//! audio device never stalls the countdown. Failures are logged and dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use notify_rust::Notification;
use pomocycle_core::SideEffects;
use tracing::{debug, warn};

use self::chime::Chime;

const APP_NAME: &str = "pomocycle";

enum Request {
    Notify { title: String, message: String },
    Chime,
}

/// Where the worker delivers requests.
trait Output {
    fn notify(&mut self, title: &str, message: &str) -> Result<(), String>;

    fn chime(&mut self) -> Result<(), String>;
}

/// The OS notification service and the default audio device.
#[derive(Default)]
struct Desktop {
    chime: Chime,
}

impl Output for Desktop {
    fn notify(&mut self, title: &str, message: &str) -> Result<(), String> {
        Notification::new()
            .summary(title)
            .body(message)
            .appname(APP_NAME)
            .show()
            .map(drop)
            .map_err(|e| e.to_string())
    }

    fn chime(&mut self) -> Result<(), String> {
        self.chime.play()
    }
}

pub struct DesktopEffects {
    tx: Sender<Request>,
    sound_disabled: Arc<AtomicBool>,
}

impl DesktopEffects {
    pub fn spawn() -> std::io::Result<Self> {
        Self::spawn_with(Desktop::default)
    }

    /// The output is built on the worker thread; audio handles are not `Send`.
    fn spawn_with<O, F>(make_output: F) -> std::io::Result<Self>
    where
        O: Output,
        F: FnOnce() -> O + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let sound_disabled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&sound_disabled);
        thread::Builder::new()
            .name("effects".into())
            .spawn(move || worker(rx, make_output(), flag))?;
        Ok(Self { tx, sound_disabled })
    }

    fn send(&self, request: Request) {
        if self.tx.send(request).is_err() {
            debug!("effects worker has exited");
        }
    }
}

impl SideEffects for DesktopEffects {
    fn notify(&self, title: &str, message: &str) {
        self.send(Request::Notify {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn play_sound(&self) {
        if self.sound_disabled.load(Ordering::Relaxed) {
            return;
        }
        self.send(Request::Chime);
    }
}

fn worker<O: Output>(rx: Receiver<Request>, mut output: O, sound_disabled: Arc<AtomicBool>) {
    while let Ok(request) = rx.recv() {
        match request {
            Request::Notify { title, message } => {
                if let Err(e) = output.notify(&title, &message) {
                    debug!(error = %e, "notification failed");
                }
            }
            // Chimes queued before the first failure are dropped too.
            Request::Chime if sound_disabled.load(Ordering::Relaxed) => {}
            Request::Chime => {
                if let Err(e) = output.chime() {
                    warn!(error = %e, "sound disabled for this run");
                    sound_disabled.store(true, Ordering::Relaxed);
                }
            }
        }
    }
}

#[cfg(feature = "sound")]
mod chime {
    use std::time::Duration;

    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    /// Two short rising tones. The output stream is opened on first use.
    #[derive(Default)]
    pub struct Chime {
        output: Option<(OutputStream, OutputStreamHandle)>,
    }

    impl Chime {
        pub fn play(&mut self) -> Result<(), String> {
            if self.output.is_none() {
                self.output = Some(OutputStream::try_default().map_err(|e| e.to_string())?);
            }
            let Some((_, handle)) = &self.output else {
                return Err("no audio output".to_string());
            };
            let sink = Sink::try_new(handle).map_err(|e| e.to_string())?;
            sink.append(SineWave::new(880.0).take_duration(Duration::from_millis(180)).amplify(0.2));
            sink.append(SineWave::new(1320.0).take_duration(Duration::from_millis(260)).amplify(0.2));
            sink.sleep_until_end();
            Ok(())
        }
    }
}

#[cfg(not(feature = "sound"))]
mod chime {
    use std::io::Write;

    /// Terminal bell.
    #[derive(Default)]
    pub struct Chime;

    impl Chime {
        pub fn play(&mut self) -> Result<(), String> {
            let mut out = std::io::stdout();
            out.write_all(b"\x07").map_err(|e| e.to_string())?;
            out.flush().map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Reports every delivery attempt and fails the ones it is told to.
    struct Recording {
        log: Sender<&'static str>,
        chime_fails: bool,
    }

    impl Output for Recording {
        fn notify(&mut self, _title: &str, _message: &str) -> Result<(), String> {
            let _ = self.log.send("notify");
            Err("no notification service".into())
        }

        fn chime(&mut self) -> Result<(), String> {
            let _ = self.log.send("chime");
            if self.chime_fails {
                Err("no audio device".into())
            } else {
                Ok(())
            }
        }
    }

    fn spawn(chime_fails: bool) -> (DesktopEffects, Receiver<&'static str>) {
        let (log, rx) = mpsc::channel();
        let effects = DesktopEffects::spawn_with(move || Recording { log, chime_fails }).unwrap();
        (effects, rx)
    }

    fn next(rx: &Receiver<&'static str>) -> &'static str {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn first_sound_failure_disables_playback() {
        let (effects, rx) = spawn(true);

        effects.play_sound();
        assert_eq!(next(&rx), "chime");
        // The worker handles requests in order, so once this notify is seen the
        // failure has been recorded.
        effects.notify("Short Break", "Time for a break");
        assert_eq!(next(&rx), "notify");
        assert!(effects.sound_disabled.load(Ordering::Relaxed));

        effects.play_sound();
        effects.notify("Pomodoro", "Back to work");
        assert_eq!(next(&rx), "notify");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn chimes_queued_behind_a_failure_are_dropped() {
        let (effects, rx) = spawn(true);

        effects.play_sound();
        effects.play_sound();
        effects.notify("Long Break", "Take a long break");
        assert_eq!(next(&rx), "chime");
        assert_eq!(next(&rx), "notify");
    }

    #[test]
    fn notification_failures_do_not_stop_the_worker() {
        let (effects, rx) = spawn(false);

        effects.notify("Short Break", "Time for a break");
        effects.play_sound();
        effects.notify("Pomodoro", "Back to work");
        effects.play_sound();

        assert_eq!(next(&rx), "notify");
        assert_eq!(next(&rx), "chime");
        assert_eq!(next(&rx), "notify");
        assert_eq!(next(&rx), "chime");
        assert!(!effects.sound_disabled.load(Ordering::Relaxed));
    }
}
