use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::PageConfig;
use crate::feed::{FeedStats, Post};

use super::gate::{EMPTY_MESSAGE, LOAD_FAILED_MESSAGE, ViewState};
use super::visibility::{ObservableVisibility, Reveal, reveal_script};
use super::{BOOK_GLYPH, header_libs_fragment};

/// The full page, rendered in the loading state. The posts fragment is
/// requested exactly once, when the page loads.
pub fn render_page(config: &PageConfig) -> Markup {
  html! {
    (DOCTYPE)
    html lang="en" {
      head {
        title { (config.heading) }
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        (header_libs_fragment())
      }
      body {
        main .blog {
          (header_fragment(config, &Reveal::at(0)))
          (render_state(&ViewState::Loading, config))
        }
        script { (PreEscaped(reveal_script())) }
      }
    }
  }
}

/// The posts area for a given view state.
pub fn render_state(state: &ViewState, config: &PageConfig) -> Markup {
  match state {
    ViewState::Loading => html! {
      section #posts .loading
        hx-get="/posts"
        hx-trigger="load"
        hx-swap="outerHTML"
        aria-busy="true" {}
    },
    ViewState::Error => html! {
      section #posts .error {
        p role="alert" { (LOAD_FAILED_MESSAGE) }
      }
    },
    ViewState::Empty => html! {
      section #posts .empty {
        div .placeholder { (BOOK_GLYPH) }
        p { (EMPTY_MESSAGE) }
      }
    },
    ViewState::Populated(posts) => html! {
      section #posts .populated {
        div .grid {
          @for (i, post) in posts.iter().enumerate() {
            (card_fragment(post, &Reveal::at(i), &config.link_label))
          }
        }
        (stats_fragment(&FeedStats::from_posts(posts)))
      }
    },
  }
}

fn header_fragment(config: &PageConfig, reveal: &Reveal) -> Markup {
  html! {
    header
      .reveal
      data-reveal=(reveal.threshold())
      data-revealed-class=(reveal.revealed_class()) {
      hgroup {
        mark { (config.badge) }
        h2 { (config.heading) }
        p { (config.tagline) }
      }
    }
  }
}

fn card_fragment(post: &Post, reveal: &Reveal, link_label: &str) -> Markup {
  html! {
    article
      .card
      .reveal
      data-key=(post.guid)
      data-reveal=(reveal.threshold())
      data-revealed-class=(reveal.revealed_class())
      style=(reveal.style()) {
      (thumbnail_fragment(post))

      small .meta {
        time { (post.display_date()) }
        " • "
        span { (post.reading_time().to_string()) }
      }

      h3 { (post.title) }
      p .preview { (post.preview_text()) }

      @let categories = post.card_categories();
      @if !categories.is_empty() {
        ul .categories {
          @for category in categories {
            li { (category) }
          }
        }
      }

      @if post.has_link() {
        footer {
          a href=(post.link) target="_blank" rel="noopener noreferrer" {
            (link_label) " \u{2197}"
          }
        }
      }
    }
  }
}

fn thumbnail_fragment(post: &Post) -> Markup {
  html! {
    @match &post.thumbnail_url {
      Some(url) => {
        img .thumb
          src=(url)
          alt=(post.title)
          loading="lazy"
          onerror="this.hidden=true;this.nextElementSibling.hidden=false";
        div .placeholder hidden { (BOOK_GLYPH) }
      },
      None => {
        div .placeholder { (BOOK_GLYPH) }
      }
    }
  }
}

fn stats_fragment(stats: &FeedStats) -> Markup {
  html! {
    div .stats {
      div {
        strong { (stats.total_posts) }
        div { "Total Posts" }
      }
      div {
        strong { (stats.distinct_categories) }
        div { "Categories" }
      }
      div {
        strong { (stats.latest_display()) }
        div { "Latest Post" }
      }
    }
  }
}
