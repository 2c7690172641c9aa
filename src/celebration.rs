use rand::{seq::SliceRandom, Rng};

const SPARKS: [char; 5] = ['*', '+', '✦', '✶', '·'];
const CHEERS: [&str; 4] = ["YOU WIN!", "ALL FOUND!", "BRAVO!", "SHARP EYES!"];
const GRAVITY: f64 = 12.0;

/// One glyph flying across the screen after a win
#[derive(Debug, Clone)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Letters of the banner glide to a fixed spot instead of falling
    pub target: Option<(f64, f64)>,
}

impl Spark {
    fn burst<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *SPARKS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
            target: None,
        }
    }

    fn letter(from: (f64, f64), to: (f64, f64), symbol: char, color_index: usize) -> Self {
        Self {
            x: from.0,
            y: from.1,
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            color_index,
            age: 0.0,
            max_age: 4.0,
            target: Some(to),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    /// Advance by `dt` seconds; false once the spark has burnt out
    fn update(&mut self, dt: f64) -> bool {
        match self.target {
            Some((tx, ty)) => {
                let dist = ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt();
                if dist > 0.5 {
                    self.x += self.vel_x * dt;
                    self.y += self.vel_y * dt;
                    self.vel_x *= 0.95;
                    self.vel_y *= 0.95;
                } else {
                    self.x = tx;
                    self.y = ty;
                }
            }
            None => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += GRAVITY * dt;
            }
        }

        self.age += dt;
        self.age < self.max_age
    }
}

/// Win animation played over the board
#[derive(Debug, Default)]
pub struct Celebration {
    pub sparks: Vec<Spark>,
    pub is_active: bool,
    remaining: f64,
    width: f64,
    height: f64,
}

impl Celebration {
    pub const DURATION_SECS: f64 = 3.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.sparks.clear();
        self.is_active = true;
        self.remaining = Self::DURATION_SECS;
        self.width = width as f64;
        self.height = height as f64;

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;

        let cheer = CHEERS.choose(&mut rng).unwrap_or(&"YOU WIN!");
        let left = cx - (cheer.chars().count() as f64 - 1.0);
        for (i, ch) in cheer.chars().enumerate().filter(|(_, ch)| *ch != ' ') {
            let from = (cx + rng.gen_range(-10.0..10.0), cy + rng.gen_range(-5.0..5.0));
            let to = (left + 2.0 * i as f64, cy - 2.0);
            self.sparks
                .push(Spark::letter(from, to, ch, rng.gen_range(0..7)));
        }

        for _ in 0..25 {
            let x = cx + rng.gen_range(-15.0..15.0);
            let y = cy + rng.gen_range(-8.0..8.0);
            self.sparks.push(Spark::burst(x, y, &mut rng));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.sparks.clear();
    }

    /// Advance the animation by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.stop();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.sparks.retain_mut(|spark| {
            let alive = spark.update(dt);
            let margin = 5.0;
            let off_screen =
                spark.y > height + margin || spark.x < -margin || spark.x > width + margin;
            alive && (spark.is_letter() || !off_screen)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let celebration = Celebration::new();
        assert!(!celebration.is_active);
        assert!(celebration.sparks.is_empty());
    }

    #[test]
    fn test_start_makes_banner_and_bursts() {
        let mut celebration = Celebration::new();
        celebration.start(80, 24);

        assert!(celebration.is_active);
        assert!(celebration.sparks.iter().any(|s| s.is_letter()));
        assert!(celebration.sparks.iter().any(|s| !s.is_letter()));
    }

    #[test]
    fn test_burst_falls_under_gravity() {
        let mut spark = Spark::burst(10.0, 10.0, &mut rand::thread_rng());
        let vel_y = spark.vel_y;
        assert!(spark.update(0.1));
        assert!(spark.vel_y > vel_y);
    }

    #[test]
    fn test_letter_glides_to_target() {
        let mut spark = Spark::letter((0.0, 0.0), (10.0, 5.0), 'W', 0);
        for _ in 0..20 {
            spark.update(0.1);
        }
        let dist = ((10.0 - spark.x).powi(2) + (5.0 - spark.y).powi(2)).sqrt();
        assert!(dist < 5.0);
    }

    #[test]
    fn test_stops_after_duration() {
        let mut celebration = Celebration::new();
        celebration.start(80, 24);

        for _ in 0..10 {
            celebration.update(0.1);
        }
        assert!(celebration.is_active);

        for _ in 0..25 {
            celebration.update(0.1);
        }
        assert!(!celebration.is_active);
        assert!(celebration.sparks.is_empty());
    }

    #[test]
    fn test_off_screen_bursts_removed() {
        let mut celebration = Celebration::new();
        celebration.start(20, 10);
        celebration
            .sparks
            .push(Spark::burst(100.0, 100.0, &mut rand::thread_rng()));

        celebration.update(0.1);
        assert!(celebration
            .sparks
            .iter()
            .all(|s| s.is_letter() || s.x <= 25.0));
    }
}
