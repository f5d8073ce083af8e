//! `FaceBlendShape`: the channel layout a Live Link Face receiver expects.

macro_rules! blendshapes {
    ($($variant:ident = $index:literal),+ $(,)?) => {
        /// One weighted facial channel, in receiver order.
        ///
        /// The first 52 are the ARKit face shapes; the remaining nine carry
        /// head and per-eye rotation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        #[allow(missing_docs)]
        pub enum FaceBlendShape {
            $($variant = $index,)+
        }

        impl FaceBlendShape {
            /// All channels in wire order.
            pub const ALL: [Self; Self::COUNT] = [$(Self::$variant,)+];

            /// Channel name as it appears in clip headers.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

blendshapes! {
    EyeBlinkLeft = 0,
    EyeLookDownLeft = 1,
    EyeLookInLeft = 2,
    EyeLookOutLeft = 3,
    EyeLookUpLeft = 4,
    EyeSquintLeft = 5,
    EyeWideLeft = 6,
    EyeBlinkRight = 7,
    EyeLookDownRight = 8,
    EyeLookInRight = 9,
    EyeLookOutRight = 10,
    EyeLookUpRight = 11,
    EyeSquintRight = 12,
    EyeWideRight = 13,
    JawForward = 14,
    JawRight = 15,
    JawLeft = 16,
    JawOpen = 17,
    MouthClose = 18,
    MouthFunnel = 19,
    MouthPucker = 20,
    MouthRight = 21,
    MouthLeft = 22,
    MouthSmileLeft = 23,
    MouthSmileRight = 24,
    MouthFrownLeft = 25,
    MouthFrownRight = 26,
    MouthDimpleLeft = 27,
    MouthDimpleRight = 28,
    MouthStretchLeft = 29,
    MouthStretchRight = 30,
    MouthRollLower = 31,
    MouthRollUpper = 32,
    MouthShrugLower = 33,
    MouthShrugUpper = 34,
    MouthPressLeft = 35,
    MouthPressRight = 36,
    MouthLowerDownLeft = 37,
    MouthLowerDownRight = 38,
    MouthUpperUpLeft = 39,
    MouthUpperUpRight = 40,
    BrowDownLeft = 41,
    BrowDownRight = 42,
    BrowInnerUp = 43,
    BrowOuterUpLeft = 44,
    BrowOuterUpRight = 45,
    CheekPuff = 46,
    CheekSquintLeft = 47,
    CheekSquintRight = 48,
    NoseSneerLeft = 49,
    NoseSneerRight = 50,
    TongueOut = 51,
    HeadYaw = 52,
    HeadPitch = 53,
    HeadRoll = 54,
    LeftEyeYaw = 55,
    LeftEyePitch = 56,
    LeftEyeRoll = 57,
    RightEyeYaw = 58,
    RightEyePitch = 59,
    RightEyeRoll = 60,
}

impl FaceBlendShape {
    /// Number of channels in a Live Link Face frame.
    pub const COUNT: usize = 61;

    /// Look up a channel by its wire index.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Wire index of this channel.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the channel is driven by the eye controller rather than clips.
    pub const fn is_eye_look(self) -> bool {
        matches!(
            self,
            Self::EyeLookDownLeft
                | Self::EyeLookInLeft
                | Self::EyeLookOutLeft
                | Self::EyeLookUpLeft
                | Self::EyeLookDownRight
                | Self::EyeLookInRight
                | Self::EyeLookOutRight
                | Self::EyeLookUpRight
        )
    }
}
