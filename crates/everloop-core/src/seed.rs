//! Bootstrap data: the founding canon and a pair of example writers.

use crate::{
  Result,
  canon::{MAGIC_SYSTEM, NewCanonRule},
  service::{CanonService, WriterService},
  store::StoryStore,
  writer::Writer,
};

/// `(title, description, category, content)` for each founding rule.
const FOUNDING_CANON: &[(&str, &str, &str, &str)] = &[
  (
    "The Loop Cycle",
    "The fundamental nature of time in Everloop",
    MAGIC_SYSTEM,
    "In the Everloop universe, time does not flow linearly. Instead, it moves \
     in cycles called Loops. Each Loop lasts approximately 1000 years before \
     reality resets to a previous state. However, certain individuals called \
     Loopers retain memories across cycles, allowing them to influence future \
     iterations.",
  ),
  (
    "The Three Realms",
    "The geographical divisions of Everloop",
    "geography",
    "The world of Everloop is divided into three distinct realms:\n\
     1. The Eternal Realm - where time flows normally within each Loop\n\
     2. The Fractured Realm - where multiple timeline fragments overlap\n\
     3. The Void Between - the space between Loops, accessible only to \
     powerful Loopers",
  ),
  (
    "Looper Abilities",
    "Powers granted to those who remember",
    MAGIC_SYSTEM,
    "Loopers possess unique abilities:\n\
     - Perfect recall of previous Loops\n\
     - Ability to sense temporal anomalies\n\
     - Limited capacity to create Echoes (shadows of past events)\n\
     - Resistance to timeline alterations\n\
     The more Loops a person has witnessed, the stronger their abilities \
     become.",
  ),
  (
    "The First Loop",
    "The origin of the cycle",
    "history",
    "According to ancient texts, the First Loop began when the Primordial \
     Weaver attempted to create a perfect world. Unable to achieve \
     perfection, the Weaver instead created a world that would continually \
     recreate itself, learning and evolving with each iteration. The \
     Weaver's final act was to scatter fragments of their consciousness \
     across time, creating the first Loopers.",
  ),
  (
    "The Weaver's Code",
    "Ethical guidelines for Loopers",
    "culture",
    "Loopers are expected to follow the Weaver's Code:\n\
     1. Preserve the integrity of the Loop cycle\n\
     2. Do not reveal the truth of Loops to non-Loopers without cause\n\
     3. Each Loop deserves to unfold naturally\n\
     4. Knowledge from previous Loops should guide, not dictate\n\
     5. The Void Between is sacred and must be respected",
  ),
];

/// `(username, email)` for the example writers.
const EXAMPLE_WRITERS: &[(&str, &str)] = &[
  ("timekeeper_aria", "aria@everloop.world"),
  ("chronicler_vex", "vex@everloop.world"),
];

/// Title of the demo story.
pub const FIRST_AWAKENING_TITLE: &str = "The First Awakening";

/// Body of the demo story.
pub const FIRST_AWAKENING: &str = "\
Kira opened her eyes to a familiar sight - the dawn breaking over the Eternal \
Realm, painting the sky in shades of gold and crimson. But this time was \
different. This time, she remembered.

The memories flooded back like a torrent: the previous Loop, the one before \
that, and countless others stretching back into infinity. She was a Looper \
now, one of the rare few who could remember when the world reset.

She sat up in her bed, her hands trembling. The Weaver's Code echoed in her \
mind, though she couldn't remember learning it. \"Each Loop deserves to unfold \
naturally,\" she whispered to herself.

But how could she let this Loop unfold naturally when she knew what was \
coming? When she remembered the mistakes, the tragedies, the wars that would \
consume the realm?

Outside her window, the city of Chronos was beginning to wake. Normal people, \
going about their lives, unaware that they had lived these same days a \
thousand times before. Unaware that in 937 years, it would all reset again.

Kira stood and dressed quickly. She had a choice to make: follow the Code and \
let events unfold, or use her knowledge to try and create a better Loop. \
Either way, she was no longer just living in the Everloop - she was part of \
its eternal dance.";

/// Create the founding canon rules, in order.
pub async fn initialize_world<S: StoryStore>(canon: &CanonService<S>) -> Result<()> {
  for &(title, description, category, content) in FOUNDING_CANON {
    canon
      .create_canon_rule(NewCanonRule {
        id: None,
        title: title.to_owned(),
        description: description.to_owned(),
        category: category.to_owned(),
        content: content.to_owned(),
        references: Vec::new(),
      })
      .await?;
  }
  Ok(())
}

/// Register the example writers and return them in registration order.
pub async fn create_example_writers<S: StoryStore>(
  writers: &WriterService<S>,
) -> Result<Vec<Writer>> {
  let mut created = Vec::with_capacity(EXAMPLE_WRITERS.len());
  for &(username, email) in EXAMPLE_WRITERS {
    created.push(writers.register_writer(username, email).await?);
  }
  Ok(created)
}
