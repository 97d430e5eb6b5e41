//! Built-in quote catalog
//!
//! The fixed list of quotes shipped with the application. Ids are assigned
//! when the catalog is built and stay stable for the life of the process.

use crate::error::{AppError, Result};
use crate::models::{Quote, QuoteCategory};
use uuid::Uuid;

use crate::models::QuoteCategory::*;

const BUILT_IN_QUOTES: &[(&str, QuoteCategory)] = &[
    ("Success starts with showing up when you don't feel like it.", Motivation),
    ("Every win begins with a decision to try.", Action),
    ("Fear fades the moment persistence takes the lead.", Courage),
    ("Bravery means acting even while afraid.", Courage),
    ("Discipline builds what talent only promises.", Discipline),
    ("Every seed of effort eventually blooms.", Growth),
    ("The energy you release is the life you live.", Mindset),
    ("Growth is slow but always worth it.", Growth),
    ("Challenges are fuel for greatness.", Resilience),
    ("Your future self will thank you for today's effort.", Motivation),
    ("Quitting guarantees failure—perseverance opens possibility.", Perseverance),
    ("A focused mind creates unstoppable change.", Focus),
    ("Obstacles are stepping stones in disguise.", Resilience),
    ("Confidence grows as excuses shrink.", Mindset),
    ("Each step forward destroys doubt.", Action),
    ("You don't need perfect timing—you need action.", Action),
    ("Tomorrow rewards the courage of today.", Courage),
    ("Strength is built, not found.", Discipline),
    ("Persistence transforms struggle into success.", Perseverance),
    ("Every setback carries a hidden lesson.", Growth),
    ("The best motivation is your own progress.", Motivation),
    ("Consistency is the heartbeat of achievement.", Discipline),
    ("Focus creates power.", Focus),
    ("Keep believing until belief becomes reality.", Mindset),
    ("Risk is proof of ambition.", Courage),
    ("Small daily actions compound into massive results.", Discipline),
    ("Failures teach faster than victories.", Growth),
    ("Your comfort zone is too small for your dreams.", Motivation),
    ("A strong will always finds a way.", Perseverance),
    ("Nobody can outwork a determined heart.", Motivation),
    ("Success is cumulative effort disguised as luck.", Success),
    ("Trying is always better than wondering.", Action),
    ("You are closer than you think.", Motivation),
    ("Rest isn't quitting—it's preparing.", Resilience),
    ("Every great story begins with courage.", Courage),
    ("Hard roads lead to the brightest destinations.", Perseverance),
    ("Excuses destroy what effort can build.", Discipline),
    ("You only fail if you stop.", Resilience),
    ("Resilience is your strongest muscle.", Resilience),
    ("Energy follows attention.", Focus),
    ("Momentum is built through repetition.", Discipline),
    ("Celebrate progress, fuel persistence.", Motivation),
    ("The best time is now, not later.", Action),
    ("Strength comes from struggle, not comfort.", Resilience),
    ("Turn effort into excellence.", Discipline),
    ("Action unlocks opportunity.", Action),
    ("Stay patient, success arrives silently.", Perseverance),
    ("Confidence is the child of practice.", Discipline),
    ("Stay hungry, stay relentless.", Motivation),
    ("The journey matters more than speed.", Mindset),
    ("Courage begins by chasing one small step.", Courage),
    ("Success is built on daily disciplines.", Success),
    ("Focused effort turns dreams to blueprints.", Focus),
    ("No storm lasts forever.", Resilience),
    ("Tough times build tougher people.", Resilience),
    ("You belong to the goals you pursue.", Mindset),
    ("Even slow progress is still progress.", Motivation),
    ("Doubts vanish when you take action.", Action),
    ("Effort multiplies potential.", Growth),
    ("Burn brightly, not quickly.", Discipline),
    ("Mistakes are evidence of forward motion.", Growth),
    ("Persistence writes the story of resilience.", Perseverance),
    ("You are never powerless—you always have choice.", Mindset),
    ("Refuse to accept limits.", Mindset),
    ("Be committed longer than challenges last.", Perseverance),
    ("The biggest risk is not starting.", Action),
    ("Joy hides in effort.", Motivation),
    ("Your 'someday' can be today.", Action),
    ("Success is silent hard work made visible.", Success),
    ("Greatness grows where excuses end.", Discipline),
    ("Brave hearts beat stronger than fear.", Courage),
    ("Keep climbing—the peak is closer with each step.", Perseverance),
    ("Your determination creates your reputation.", Discipline),
    ("Focus beats distraction every time.", Focus),
    ("Every challenge sharpens your edge.", Resilience),
    ("You already possess what it takes.", Mindset),
    ("Discipline is self-respect in action.", Discipline),
    ("Never underestimate the power of persistence.", Perseverance),
    ("Build a life worth waking up for.", Motivation),
    ("Great journeys require long patience.", Perseverance),
    ("Failure is feedback, not the finale.", Growth),
    ("Courage always costs less than regret.", Courage),
    ("Daily consistency outshines occasional intensity.", Discipline),
    ("Strength grows in the waiting.", Resilience),
    ("Struggle is proof of trying.", Action),
    ("Better to stumble forward than stand still.", Action),
    ("Hard work outlives hesitation.", Discipline),
    ("Every limit can be stretched.", Mindset),
    ("Invest effort, reap resilience.", Discipline),
    ("You are stronger at the finish than the start.", Growth),
    ("Quitters never remember what they could have been.", Perseverance),
    ("Willpower is the raw material of success.", Discipline),
    ("Consistency makes impossible things possible.", Discipline),
    ("Your efforts inspire others silently.", Motivation),
    ("Believe first, achieve next.", Mindset),
    ("Bold actions create bold results.", Action),
    ("Focus is the shortcut to mastery.", Focus),
    ("Victory favors the relentless.", Perseverance),
    ("Each sunrise brings fresh opportunities.", Motivation),
    ("Nothing works unless you work.", Action),
    ("Strive to be resilient, not perfect.", Resilience),
    ("Effort today, success tomorrow.", Motivation),
    ("Resilience turns obstacles into milestones.", Resilience),
    ("Every push brings progress.", Action),
    ("Sweat today is glory tomorrow.", Motivation),
    ("Success requires stubborn faith.", Success),
    ("You aren't behind—you're on your path.", Mindset),
    ("Dedication builds impossible dreams.", Discipline),
    ("Consistency is a superpower.", Discipline),
    ("Be stronger than your excuses.", Resilience),
    ("Fear loses to focus.", Focus),
    ("Endurance beats resistance.", Perseverance),
    ("Be the worker your dream deserves.", Motivation),
    ("Every action is a vote for your future.", Mindset),
    ("Effort earns freedom.", Discipline),
    ("The harder the climb, the greater the view.", Perseverance),
    ("Stay grounded, aim higher.", Mindset),
    ("Success rewards those who persist longest.", Success),
    ("Motivation fades, habits last.", Discipline),
    ("Small adjustments build massive change.", Growth),
    ("Inner belief is unshakable armor.", Mindset),
    ("Strive until success bows to persistence.", Perseverance),
    ("Every step builds momentum.", Action),
    ("Be relentless against delay.", Action),
    ("Determination is the key that fits every lock.", Discipline),
    ("Trust effort over luck.", Discipline),
    ("Faith fuels the impossible.", Mindset),
    ("Work until doubt disappears.", Action),
    ("You are your greatest project.", Growth),
    ("Failure doesn't define you, persistence does.", Perseverance),
    ("Refuse to stand still.", Action),
    ("Small acts create giant leaps.", Action),
    ("The habit of effort becomes identity.", Discipline),
    ("Grit is golden.", Resilience),
    ("Enthusiasm fights fatigue.", Motivation),
    ("Break your limits daily.", Mindset),
    ("Every win starts as a choice.", Mindset),
    ("Ambition is your compass.", Motivation),
    ("Stay committed beyond the excitement.", Perseverance),
    ("Your growth inspires others.", Motivation),
    ("Courage is contagious.", Courage),
    ("Keep moving; slowing down isn't stopping.", Action),
    ("Every day counts.", Motivation),
    ("Growth is built, not gifted.", Growth),
    ("Wherever you go, bring persistence.", Perseverance),
    ("Chase your dream as if it's running too.", Motivation),
    ("Fear is a test of seriousness.", Courage),
    ("Motivation begins with motion.", Action),
    ("Push past resistance daily.", Resilience),
    ("Passion makes effort effortless.", Motivation),
    ("No quit, no limits.", Perseverance),
    ("Write your goals in action.", Action),
    ("Invest sweat, collect greatness.", Discipline),
    ("Your challenges are promotions in disguise.", Resilience),
    ("Patience and effort never collide—they combine.", Perseverance),
    ("Keep rising, even if slowly.", Action),
    ("A minute of action beats hours of planning.", Action),
    ("Transformation starts with repetition.", Growth),
    ("Every excuse costs progress.", Action),
    ("Victories love persistence.", Perseverance),
    ("Optimism creates strength.", Mindset),
    ("Grind until your vision is reality.", Discipline),
    ("With endurance, all is possible.", Perseverance),
    ("Growth follows gratitude and grit.", Growth),
    ("No one regrets the hard work done.", Discipline),
    ("Push harder than your obstacles.", Resilience),
    ("Every effort compounds quietly.", Discipline),
    ("You were made to rise.", Motivation),
    ("Your fire burns brightest when winds blow hardest.", Resilience),
    ("Failure is temporary, perseverance permanent.", Perseverance),
    ("Dedication is the bridge to destiny.", Discipline),
    ("Bold steps attract big opportunities.", Action),
    ("You can't outrun effort—it always pays.", Discipline),
    ("Be motivated enough to act, every day.", Motivation),
    ("Dreams expand with persistence.", Perseverance),
    ("Every problem sharpens your resolve.", Resilience),
    ("Sweat transforms potential into power.", Discipline),
    ("Success crowns consistent effort.", Success),
    ("Stand taller after every fall.", Resilience),
    ("Effort is the truest language of ambition.", Discipline),
    ("Purpose fuels persistence.", Motivation),
    ("Each trial makes triumph sweeter.", Resilience),
    ("Focus cracks even the toughest challenges.", Focus),
    ("You are the designer of your direction.", Mindset),
    ("Rise above resistance.", Resilience),
    ("Your limits exist only if you accept them.", Mindset),
    ("Hard work never returns empty-handed.", Discipline),
    ("Effort done in silence is success's loudest noise.", Discipline),
    ("Hold steady, results are forming.", Perseverance),
    ("Believe, act, repeat.", Action),
    ("Nothing replaces persistence.", Perseverance),
    ("One determined person can shift everything.", Motivation),
    ("Work quietly, succeed loudly.", Discipline),
    ("Keep showing up—results are inevitable.", Perseverance),
    ("Every delay is preparation.", Mindset),
    ("Patience polishes perseverance.", Perseverance),
    ("Fuel yourself with goals, not doubts.", Motivation),
    ("Big dreams demand stubborn effort.", Discipline),
    ("Each repetition strengthens destiny.", Discipline),
    ("Every finish line was once a starting point.", Mindset),
];

/// Immutable, never-empty list of quotes
#[derive(Debug, Clone)]
pub struct Catalog {
    quotes: Vec<Quote>,
}

impl Catalog {
    /// Catalog of the built-in quotes
    pub fn builtin() -> Self {
        let quotes = BUILT_IN_QUOTES
            .iter()
            .filter_map(|(content, category)| Quote::new(*content, None, *category).ok())
            .collect();

        Self { quotes }
    }

    /// Catalog over caller-supplied quotes; fails when nothing usable remains
    pub fn from_quotes(quotes: Vec<Quote>) -> Result<Self> {
        let quotes: Vec<Quote> = quotes.into_iter().filter(Quote::is_valid).collect();
        if quotes.is_empty() {
            return Err(AppError::NoQuotesAvailable);
        }
        Ok(Self { quotes })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quote shown before anything has been selected
    pub fn first(&self) -> Option<&Quote> {
        self.quotes.first()
    }

    pub fn find(&self, id: Uuid) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }
}
