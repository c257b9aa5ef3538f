use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use super::actions::Flow;
use super::fade::DEFAULT_FADE;
use super::{App, Theme};
use crate::bridge::{HostBridge, HostEvent};
use crate::menu::{ContextMenuPayload, MenuTimings};

const FRAME: Duration = Duration::from_millis(16);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Everything [`run`] needs besides the transport.
#[derive(Debug, Clone)]
pub struct RunOptions {
	pub timings: MenuTimings,
	pub fade: Duration,
	pub theme: Theme,
	/// Menu shown as soon as the UI starts, as if the host had sent it.
	pub initial_menu: Option<ContextMenuPayload>,
}

impl Default for RunOptions {
	fn default() -> Self {
		Self {
			timings: MenuTimings::default(),
			fade: DEFAULT_FADE,
			theme: Theme::default(),
			initial_menu: None,
		}
	}
}

/// Run the menu in the terminal until the user quits with `Ctrl+C`.
pub fn run<B: HostBridge>(
	bridge: B,
	host_events: Option<mpsc::Receiver<HostEvent>>,
	options: RunOptions,
) -> Result<()> {
	let mut app = App::new(bridge, options.timings, options.fade);
	app.set_theme(options.theme);
	if let Some(events) = host_events {
		app.set_host_events(events);
	}
	if let Some(payload) = options.initial_menu {
		app.menu.show(payload, Instant::now());
	}
	app.run()
}

impl<'a, B: HostBridge> App<'a, B> {
	/// Pump the terminal event loop until the user exits.
	pub fn run(&mut self) -> Result<()> {
		let mut terminal = ratatui::init();
		terminal.clear()?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(INPUT_POLL)? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<()> = 'event_loop: loop {
			self.tick(Instant::now());

			loop {
				match event_rx.try_recv() {
					Ok(Event::Resize(_, _)) => {}
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			let now = Instant::now();
			if let Err(err) = terminal.draw(|frame| self.draw(frame, now)) {
				break Err(err.into());
			}

			let mut exit = false;
			while let Some(event) = pending_events.pop_front() {
				if let Event::Key(key) = event
					&& key.kind == KeyEventKind::Press
					&& self.handle_key(key, Instant::now()) == Flow::Exit
				{
					exit = true;
					break;
				}
			}
			if exit {
				info!("exit requested");
				break Ok(());
			}

			thread::sleep(self.frame_delay(Instant::now()));
		};

		ratatui::restore();
		self.menu.teardown();

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		result
	}

	/// Sleep a frame, or less when deferred menu work falls due sooner.
	fn frame_delay(&self, now: Instant) -> Duration {
		match self.menu.next_deadline() {
			Some(deadline) => deadline.saturating_duration_since(now).min(FRAME),
			None => FRAME,
		}
	}
}
