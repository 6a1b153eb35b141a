use std::time::Duration;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const STAGGER_STEP: Duration = Duration::from_millis(100);
pub const REVEALED_CLASS: &str = "revealed";

/// What the page script needs to know to watch an element: how much of
/// it must be on screen, and which class to latch once it is.
pub trait ObservableVisibility {
  fn threshold(&self) -> f64;

  fn revealed_class(&self) -> &'static str;
}

pub fn stagger_delay(index: usize) -> Duration {
  let steps = u32::try_from(index).unwrap_or(u32::MAX);
  STAGGER_STEP.saturating_mul(steps)
}

/// Reveal settings for the element mounted at a given position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
  threshold: f64,
  delay: Duration,
}

impl Reveal {
  pub fn at(index: usize) -> Self {
    Self {
      threshold: REVEAL_THRESHOLD,
      delay: stagger_delay(index),
    }
  }

  pub fn style(&self) -> String {
    format!("transition-delay: {}ms", self.delay.as_millis())
  }
}

impl ObservableVisibility for Reveal {
  fn threshold(&self) -> f64 {
    self.threshold
  }

  fn revealed_class(&self) -> &'static str {
    REVEALED_CLASS
  }
}

/// Watches every `[data-reveal]` element, latches its revealed class the
/// first time it crosses its threshold and stops watching it. Elements
/// removed by an htmx swap are unobserved before they go.
pub fn reveal_script() -> &'static str {
  r#"
(() => {
  const observers = new Map();
  const observerFor = (threshold) => {
    if (!observers.has(threshold)) {
      const observer = new IntersectionObserver((entries) => {
        for (const entry of entries) {
          if (entry.isIntersecting) {
            entry.target.classList.add(entry.target.dataset.revealedClass);
            observer.unobserve(entry.target);
          }
        }
      }, { threshold });
      observers.set(threshold, observer);
    }
    return observers.get(threshold);
  };
  const scan = (root) => {
    const targets = [...root.querySelectorAll("[data-reveal]")];
    if (root.matches && root.matches("[data-reveal]")) targets.push(root);
    for (const el of targets) {
      if (el.classList.contains(el.dataset.revealedClass)) continue;
      observerFor(Number(el.dataset.reveal) || 0.1).observe(el);
    }
  };
  document.body.addEventListener("htmx:load", (e) => scan(e.detail.elt));
  document.body.addEventListener("htmx:beforeCleanupElement", (e) => {
    for (const observer of observers.values()) observer.unobserve(e.detail.elt);
  });
})();
"#
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stagger_grows_with_index() {
    assert_eq!(stagger_delay(0), Duration::ZERO);
    assert_eq!(stagger_delay(3), Duration::from_millis(300));
    assert_eq!(stagger_delay(1).saturating_mul(2), stagger_delay(2));
    assert_eq!(Reveal::at(2).style(), "transition-delay: 200ms");
  }

  #[test]
  fn every_position_shares_the_threshold() {
    for index in [0, 1, 50] {
      let reveal = Reveal::at(index);
      assert_eq!(reveal.threshold(), REVEAL_THRESHOLD);
      assert_eq!(reveal.revealed_class(), "revealed");
    }
  }

  #[test]
  fn script_keeps_one_observer_per_threshold() {
    let script = reveal_script();
    assert_eq!(script.matches("new IntersectionObserver(").count(), 1);
    assert!(script.contains("if (!observers.has(threshold))"));
    assert!(script.contains("observers.set(threshold, observer)"));
  }

  #[test]
  fn script_latches_then_stops_watching() {
    let script = reveal_script();
    let add = script.find("classList.add(").unwrap();
    let unobserve = script.find("observer.unobserve(entry.target)").unwrap();
    assert!(add < unobserve);
    assert_eq!(script.matches("classList.add(").count(), 1);
  }

  #[test]
  fn script_never_hides_a_revealed_element() {
    let script = reveal_script();
    assert!(!script.contains("classList.remove"));
    assert!(!script.contains("classList.toggle"));
    assert!(!script.contains("className ="));
  }

  #[test]
  fn script_unobserves_swapped_out_elements() {
    let script = reveal_script();
    assert!(script.contains("htmx:beforeCleanupElement"));
    assert!(script.contains("observer.unobserve(e.detail.elt)"));
  }
}
