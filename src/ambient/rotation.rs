//! Cursors for the rotating hero panels: quote carousel, weather report,
//! and featured location.

use crate::catalog::{Featured, Quote, Weather, FEATURED, QUOTES, WEATHER};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rotations {
    quote: usize,
    weather: usize,
    featured: usize,
}

fn advance(cursor: &mut usize, len: usize) -> usize {
    *cursor = (*cursor + 1) % len.max(1);
    *cursor
}

impl Rotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next quote. Returns its index and content.
    pub fn next_quote(&mut self) -> (usize, &'static Quote) {
        let i = advance(&mut self.quote, QUOTES.len());
        (i, &QUOTES[i])
    }

    pub fn next_weather(&mut self) -> &'static Weather {
        &WEATHER[advance(&mut self.weather, WEATHER.len())]
    }

    pub fn next_featured(&mut self) -> &'static Featured {
        &FEATURED[advance(&mut self.featured, FEATURED.len())]
    }

    pub fn current_featured(&self) -> &'static Featured {
        &FEATURED[self.featured]
    }
}

/// Screen-reader text announced when the quote changes.
pub fn quote_announcement(quote: &Quote) -> String {
    format!("Quote: {} {}", quote.text, quote.author)
}
