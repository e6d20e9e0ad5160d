//! End-to-end tests for addon activation, host-driven scanning and disposal.
//!
//! A fake terminal implements both host integration surfaces and drives the
//! registered provider the way a real host would: scanning visible lines,
//! hit-testing pointer positions and dispatching hover/click events.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use regex::Regex;
use termlinks::{
    CellPos, ClickHandler, Disposable, Link, LinkOptions, LinkProvider, MatcherId, MatcherOptions,
    ProviderCallbacks, TermHost, WebLinksAddon, URL_MATCH_GROUP,
};

/// Fake terminal with a viewport of text lines and a provider registry.
struct FakeTerm {
    lines: Vec<String>,
    provider: Option<Rc<dyn LinkProvider>>,
    provider_releases: Rc<RefCell<usize>>,
    matcher: Option<(MatcherId, Regex, MatcherOptions)>,
    deregistrations: usize,
}

impl FakeTerm {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            provider: None,
            provider_releases: Rc::new(RefCell::new(0)),
            matcher: None,
            deregistrations: 0,
        }
    }

    /// Scan every visible line through the registered provider.
    fn visible_links(&self) -> Vec<Link> {
        let provider = self.provider.as_ref().expect("provider registered");
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(row, text)| provider.provide_links(row, text))
            .collect()
    }

    /// Find the link under a cell, as a host would on pointer movement.
    fn link_at(&self, pos: CellPos) -> Option<Link> {
        self.visible_links().into_iter().find(|link| {
            link.range.start.row == pos.row
                && pos.col >= link.range.start.col
                && pos.col < link.range.end.col
        })
    }
}

struct ProviderRegistration {
    releases: Rc<RefCell<usize>>,
}

impl Disposable for ProviderRegistration {
    fn dispose(&mut self) {
        *self.releases.borrow_mut() += 1;
    }
}

impl TermHost for FakeTerm {
    fn supports_link_providers(&self) -> bool {
        true
    }

    fn register_link_provider(&mut self, provider: Rc<dyn LinkProvider>) -> Box<dyn Disposable> {
        self.provider = Some(provider);
        Box::new(ProviderRegistration {
            releases: self.provider_releases.clone(),
        })
    }

    fn register_link_matcher(
        &mut self,
        pattern: Regex,
        _handler: ClickHandler,
        options: MatcherOptions,
    ) -> MatcherId {
        let id = MatcherId(7);
        self.matcher = Some((id, pattern, options));
        id
    }

    fn deregister_link_matcher(&mut self, _id: MatcherId) {
        self.deregistrations += 1;
        self.matcher = None;
    }
}

fn pointer(row: u16, column: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn provider_flow_scan_hover_click_dispose() {
    let term = Rc::new(RefCell::new(FakeTerm::new(&[
        "$ cargo doc --open",
        "   Docs at https://docs.example.com/termlinks ready.",
        "see http://one.example.io and http://two.example.io",
    ])));

    let clicked: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let hovered: Rc<RefCell<Vec<(String, usize)>>> = Rc::new(RefCell::new(Vec::new()));

    let click_sink = clicked.clone();
    let hover_sink = hovered.clone();
    let mut addon = WebLinksAddon::new()
        .with_handler(Rc::new(move |_event, url| {
            click_sink.borrow_mut().push(url.to_string());
        }))
        .with_options(LinkOptions::Provider(ProviderCallbacks {
            hover: Some(Rc::new(move |_event, url, range| {
                hover_sink
                    .borrow_mut()
                    .push((url.to_string(), range.start.col));
            })),
            leave: None,
        }))
        .with_link_provider(true);

    addon.activate(term.clone());

    // Host-driven scan of the viewport.
    let links = term.borrow().visible_links();
    let texts: Vec<&str> = links.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "https://docs.example.com/termlinks",
            "http://one.example.io",
            "http://two.example.io",
        ]
    );

    // Pointer over the URL on row 1; the trailing period stays prose.
    let link = term
        .borrow()
        .link_at(CellPos::new(1, 15))
        .expect("link under pointer");
    assert_eq!(link.text, "https://docs.example.com/termlinks");

    let provider = term.borrow().provider.clone().unwrap();
    provider.hover(&pointer(1, 15), &link);
    provider.activate(&pointer(1, 15), &link);

    assert_eq!(
        hovered.borrow().as_slice(),
        [("https://docs.example.com/termlinks".to_string(), 11)]
    );
    assert_eq!(
        clicked.borrow().as_slice(),
        ["https://docs.example.com/termlinks"]
    );

    addon.dispose();
    assert_eq!(*term.borrow().provider_releases.borrow(), 1);

    // A second disposal performs no further teardown.
    addon.dispose();
    assert_eq!(*term.borrow().provider_releases.borrow(), 1);
}

#[test]
fn late_host_dispatch_after_disposal_is_harmless() {
    let term = Rc::new(RefCell::new(FakeTerm::new(&["http://a.example.org"])));

    let clicked: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let sink = clicked.clone();
    let mut addon = WebLinksAddon::new()
        .with_handler(Rc::new(move |_event, _url| {
            *sink.borrow_mut() += 1;
        }))
        .with_link_provider(true);
    addon.activate(term.clone());

    let provider = term.borrow().provider.clone().unwrap();
    let links = term.borrow().visible_links();
    addon.dispose();

    // Host-side race: a callback fires after release. Scanning stays pure
    // and dispatch must not fault.
    let late = provider.provide_links(0, "http://a.example.org");
    assert_eq!(late, links);
    provider.activate(&pointer(0, 0), &links[0]);
    assert_eq!(*clicked.borrow(), 1);
}

#[test]
fn legacy_flow_registers_pattern_and_forced_match_index() {
    let term = Rc::new(RefCell::new(FakeTerm::new(&[])));

    let mut addon = WebLinksAddon::new().with_options(LinkOptions::Matcher(MatcherOptions {
        match_index: 3,
        priority: -1,
    }));
    addon.activate(term.clone());

    {
        let borrowed = term.borrow();
        let (id, pattern, options) = borrowed.matcher.as_ref().expect("matcher registered");
        assert_eq!(*id, MatcherId(7));
        assert_eq!(options.match_index, URL_MATCH_GROUP);
        assert_eq!(options.priority, -1);

        // The host applies the registered pattern itself in legacy mode.
        let caps = pattern.captures("go to https://example.com/x now").unwrap();
        assert_eq!(
            caps.get(options.match_index).unwrap().as_str(),
            "https://example.com/x"
        );
    }

    addon.dispose();
    assert_eq!(term.borrow().deregistrations, 1);
    assert!(term.borrow().matcher.is_none());
}
