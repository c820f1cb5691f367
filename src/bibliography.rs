/// Some literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// M. Abramowitz and I.A. Stegun (1964): *Handbook of Mathematical Functions*.
    /// National Bureau of Standards, Applied Mathematics Series 55.
    /// Section 25.4.29 (Gauss-Legendre nodes).
    Abr64,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// W.H. Press, S.A. Teukolsky, W.T. Vetterling and B.P. Flannery (1992):
    /// *Numerical Recipes in C*, 2nd ed., Cambridge University Press.
    /// Section 4.3 (Romberg integration).
    Pre92,

    /// J.P. Snyder (1987): *Map Projections - A Working Manual*.
    /// U.S. Geological Survey Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395).
    Sny87,

    /// R.E. Deakin (2010): *The Normal Section Curve on an Ellipsoid*,
    /// and the related notes on geocentric and geodetic latitude.
    /// RMIT University lecture notes.
    Dea10,
}
