fn main() {
    bevy_fireballs::game::run();
}
