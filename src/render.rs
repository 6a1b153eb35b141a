mod gate;
mod page;
mod visibility;

use maud::{Markup, PreEscaped, html};

pub use gate::{MountedGate, RenderGate, ViewState};
pub use page::{render_page, render_state};

const BOOK_GLYPH: &str = "\u{1F4D6}";

fn header_libs_fragment() -> Markup {
  html! {
    script
      src="https://unpkg.com/htmx.org@2.0.1"
      referrerpolicy="no-referrer" {}
    link
      rel="stylesheet"
      href="https://matcha.mizu.sh/matcha.css"
      referrerpolicy="no-referrer" {}
    style { (PreEscaped(extra_styles())) }
  }
}

fn extra_styles() -> &'static str {
  r#"
  .reveal {
    opacity: 0;
    transform: translateY(2.5rem);
    transition: opacity 700ms, transform 700ms;
  }
  .reveal.revealed {
    opacity: 1;
    transform: none;
  }
  .grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr));
    gap: 1.5rem;
  }
  .thumb, .placeholder {
    height: 12rem;
    width: 100%;
    object-fit: cover;
  }
  .placeholder {
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 4rem;
    opacity: 0.4;
  }
  .placeholder[hidden] {
    display: none;
  }
  .stats {
    display: flex;
    justify-content: center;
    gap: 2rem;
    text-align: center;
  }
"#
}
