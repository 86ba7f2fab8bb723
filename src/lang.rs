/// `Sensitive<T>` wraps secrets (broker keys, certificates) so they are masked whenever the
/// value is printed through `Display` or `Debug`, including inside `tracing` fields.
///
/// The wrapped value is reached through `Deref` or [`Sensitive::expose`].
pub mod sensitive {
    use serde::{Deserialize, Serialize};

    use std::fmt::{Debug, Display, Formatter};
    use std::ops::Deref;
    use std::str::FromStr;

    const MASK: &str = "******";

    #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Sensitive<T>(T);

    impl<T> Sensitive<T> {
        pub fn new(value: T) -> Self {
            Self(value)
        }

        pub fn expose(&self) -> &T {
            &self.0
        }
    }

    impl<T> Display for Sensitive<T> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(MASK)
        }
    }

    impl<T> Debug for Sensitive<T> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.debug_tuple("Sensitive").field(&MASK).finish()
        }
    }

    impl<T> From<T> for Sensitive<T> {
        fn from(value: T) -> Self {
            Self(value)
        }
    }

    // lets clap parse `Option<Sensitive<String>>` straight from flags and env vars
    impl<T: FromStr> FromStr for Sensitive<T> {
        type Err = T::Err;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            T::from_str(s).map(Self)
        }
    }

    impl<T> Deref for Sensitive<T> {
        type Target = T;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

}
