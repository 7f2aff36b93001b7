//! Ellipsoidal geodetic math: geographic↔Cartesian conversion and local
//! East-North-Up tangent-plane frames.

mod ellipsoid;

pub use ellipsoid::Ellipsoid;
