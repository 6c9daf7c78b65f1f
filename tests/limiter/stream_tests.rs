// tests/limiter/stream_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::test_clock::TestClock;
    use leaky_limiter::{LeakyLimiter, TakeDecision};
    use std::time::Duration;

    #[test]
    fn rested_bucket_releases_one_second_of_work() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(100, clock.clone());

        limiter.add(1000);

        // wait a minute
        clock.set_time(60.0);
        let decision = limiter.take().unwrap();
        assert_eq!(decision.released, 100);
        assert_eq!(decision.wait, Duration::ZERO);
        assert_eq!(limiter.bucket_size(), 900);

        // the 100 for this second has already been handed out
        clock.advance_ms(100);
        let decision = limiter.take().unwrap();
        assert_eq!(decision.released, 0);
        assert_eq!(decision.wait, Duration::from_millis(900));
        assert_eq!(limiter.bucket_size(), 900);
    }

    #[test]
    fn zero_limit_drains_one_unit_per_second() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(0, clock.clone());
        assert_eq!(limiter.limit(), 1);

        limiter.add(10);

        let mut calls = 0;
        let mut released = 0;
        let mut waits = Vec::new();
        loop {
            let decision = limiter.take().unwrap();
            calls += 1;
            if decision.is_idle() {
                break;
            }
            if decision.is_throttled() {
                waits.push(decision.wait);
                clock.advance(decision.wait);
            }
            released += decision.released;
        }

        assert_eq!(released, 10);
        assert_eq!(calls, 20);
        assert_eq!(waits.len(), 9);
        assert!(waits.iter().all(|w| *w == Duration::from_secs(1)));
        assert_eq!(clock.time_as_f64(), 9.0);
    }

    #[test]
    fn full_window_holds_back_frequent_callers() {
        let clock = TestClock::new(10.0);
        let limiter = LeakyLimiter::with_clock(100, clock.clone());
        limiter.add(10_000);

        // the first call is a rested release of the full limit
        assert_eq!(limiter.take().unwrap().released, 100);

        // the next second is throttled until the first release ages out
        let decision = limiter.take().unwrap();
        assert_eq!(decision.wait, Duration::from_secs(1));
        clock.advance(decision.wait);

        // a full second since the last call
        assert_eq!(limiter.take().unwrap().released, 100);

        // the window stays full for the rest of this second
        let mut second = Vec::new();
        for _ in 0..9 {
            clock.advance_ms(100);
            second.push(limiter.take().unwrap());
        }
        assert!(second.iter().all(|d| d.released == 0));
    }

    #[test]
    fn boosted_share_is_drawn_once_the_window_clears() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(100, clock.clone());
        limiter.add(50);

        // releases everything at once, well under the limit
        assert_eq!(limiter.take().unwrap().released, 50);

        limiter.add(1000);
        let mut draws = Vec::new();
        for _ in 0..5 {
            clock.advance_ms(100);
            draws.push(limiter.take().unwrap().released);
        }
        // 50 + 44 fits, the fifth draw is cut to what remains in the second
        assert_eq!(draws, vec![11, 11, 11, 11, 6]);
        assert_eq!(limiter.bucket_size(), 1000 - 50);
    }

    #[test]
    fn empty_bucket_is_idle_forever() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(10, clock.clone());

        for _ in 0..5 {
            let decision = limiter.take().unwrap();
            assert_eq!(
                decision,
                TakeDecision {
                    released: 0,
                    wait: Duration::ZERO,
                }
            );
            clock.advance_ms(250);
        }
        assert_eq!(limiter.bucket_size(), 0);
    }

    #[test]
    fn idle_calls_do_not_reset_the_rest_period() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(100, clock.clone());

        // nothing queued: these calls are not events
        for _ in 0..3 {
            assert!(limiter.take().unwrap().is_idle());
            clock.advance_ms(10);
        }

        limiter.add(500);
        assert_eq!(limiter.take().unwrap().released, 100);
    }

    #[test]
    fn add_zero_is_a_no_op() {
        let limiter = LeakyLimiter::with_clock(10, TestClock::new(0.0));
        limiter.add(0);
        assert_eq!(limiter.bucket_size(), 0);
        assert!(limiter.take().unwrap().is_idle());
    }

    #[test]
    fn partial_bucket_is_released_whole() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(100, clock.clone());
        limiter.add(30);

        let decision = limiter.take().unwrap();
        assert_eq!(decision.released, 30);
        assert_eq!(limiter.bucket_size(), 0);
        assert!(limiter.take().unwrap().is_idle());
    }

    #[test]
    fn wait_counts_from_the_newest_release() {
        let clock = TestClock::new(0.0);
        let limiter = LeakyLimiter::with_clock(20, clock.clone());
        limiter.add(15);
        assert_eq!(limiter.take().unwrap().released, 15);

        // 400ms later the boosted share is 8.8, rounded to 9, cut to 5
        limiter.add(100);
        clock.advance_ms(400);
        assert_eq!(limiter.take().unwrap().released, 5);

        clock.advance_ms(100);
        let decision = limiter.take().unwrap();
        assert!(decision.is_throttled());
        assert_eq!(decision.wait, Duration::from_millis(900));
    }
}
