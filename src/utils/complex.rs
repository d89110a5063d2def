use num_complex::{Complex32, Complex64};

/// Floating point precision of an output array (`f32` or `f64`).
///
/// All intermediate arithmetic is carried out in `f64`; this trait only
/// governs the element type handed back to the caller.
pub trait Real: Copy + PartialOrd + Default + std::fmt::Debug + Send + Sync + 'static {
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
}

impl Real for f32 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Element type accepted by the RMS and dB routines: real or complex floats.
pub trait Sample: Copy + Default + Send + Sync + 'static {
    /// Precision of results derived from this sample type.
    type Real: Real;

    const IS_COMPLEX: bool;

    /// Squared magnitude |x|^2. For complex values this is `re^2 + im^2`,
    /// never `abs(x)^2`, so no precision is lost in the square root.
    fn abs2(self) -> f64;

    /// Magnitude |x|.
    fn magnitude(self) -> f64;

    /// Value used on a power scale: the sample itself for real input,
    /// the magnitude for complex input (phase is discarded).
    fn power_value(self) -> f64;
}

impl Sample for f32 {
    type Real = f32;
    const IS_COMPLEX: bool = false;

    #[inline]
    fn abs2(self) -> f64 {
        let v = self as f64;
        v * v
    }

    #[inline]
    fn magnitude(self) -> f64 {
        (self as f64).abs()
    }

    #[inline]
    fn power_value(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    type Real = f64;
    const IS_COMPLEX: bool = false;

    #[inline]
    fn abs2(self) -> f64 {
        self * self
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn power_value(self) -> f64 {
        self
    }
}

impl Sample for Complex32 {
    type Real = f32;
    const IS_COMPLEX: bool = true;

    #[inline]
    fn abs2(self) -> f64 {
        let (re, im) = (self.re as f64, self.im as f64);
        re * re + im * im
    }

    #[inline]
    fn magnitude(self) -> f64 {
        (self.re as f64).hypot(self.im as f64)
    }

    #[inline]
    fn power_value(self) -> f64 {
        self.magnitude()
    }
}

impl Sample for Complex64 {
    type Real = f64;
    const IS_COMPLEX: bool = true;

    #[inline]
    fn abs2(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn power_value(self) -> f64 {
        self.magnitude()
    }
}

/// Compute squared magnitude (|x|^2) of any supported sample.
///
/// # Example
/// ```
/// use hush::utils::abs2;
/// use num_complex::Complex32;
///
/// assert_eq!(abs2(Complex32::new(3.0, 4.0)), 25.0);
/// assert_eq!(abs2(-2.0f32), 4.0);
/// ```
pub fn abs2<A: Sample>(x: A) -> f64 {
    x.abs2()
}
