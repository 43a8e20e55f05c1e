//! Settings panel: mode selection, file upload, export and title editing.

use leptos::prelude::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::mode::{Mode, ModeController};

/// A `Settings` button that reveals the mode radios, the upload input (in
/// upload mode only), `Download JSON`, and the title edit toggle.
#[component]
pub fn SettingsPanel<M, F, D>(
	controller: RwSignal<ModeController>,
	on_mode: M,
	on_file: F,
	on_download: D,
) -> impl IntoView
where
	M: Fn(Mode) + Clone + 'static,
	F: Fn(File) + 'static,
	D: Fn() + 'static,
{
	let visible = RwSignal::new(false);
	let is_mode = move |mode: Mode| controller.with(|c| c.mode() == mode);

	let on_mode_change = move |ev: Event| {
		if let Some(mode) = Mode::parse(&event_target_value(&ev)) {
			on_mode(mode);
		}
	};

	let on_file_change = move |ev: Event| {
		let input: HtmlInputElement = event_target(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			on_file(file);
		}
		// Lets the same file be picked again.
		input.set_value("");
	};

	view! {
		<button class="settings-toggle" on:click=move |_| visible.update(|v| *v = !*v)>
			"Settings"
		</button>
		<div class="settings" style:display=move || if visible.get() { "block" } else { "none" }>
			<div class="mode-select" style="margin-bottom: 20px;">
				<label>
					<input
						type="radio"
						name="mode"
						value=Mode::Upload.as_str()
						prop:checked=move || is_mode(Mode::Upload)
						on:change=on_mode_change.clone()
					/>
					"Upload File"
				</label>
				<label style="margin-left: 20px;">
					<input
						type="radio"
						name="mode"
						value=Mode::Edit.as_str()
						prop:checked=move || is_mode(Mode::Edit)
						on:change=on_mode_change
					/>
					"Edit Online"
				</label>
			</div>
			<div
				class="upload"
				style:display=move || if is_mode(Mode::Upload) { "block" } else { "none" }
			>
				<input type="file" accept="application/json" on:change=on_file_change />
			</div>
			<button on:click=move |_| on_download()>"Download JSON"</button>
			<button
				style="margin-left: 5px;"
				on:click=move |_| controller.update(|c| {
					c.toggle_title_editing();
				})
			>
				{move || if controller.with(|c| c.is_editing_title()) { "Save Title" } else { "Edit Title" }}
			</button>
		</div>
	}
}
